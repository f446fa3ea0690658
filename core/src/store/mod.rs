//! Local todo collection kept in sync with a `TodoGateway`.
//!
//! # Design
//! `TodoStore` is a cheap, cloneable handle. Every command runs its gateway
//! call on tokio's blocking pool, then reconciles the shared state inside a
//! single mutex-guarded section that also publishes the new snapshot to
//! subscribers. The lock is never held across an `.await`, so reconciliation
//! steps never interleave while network calls overlap freely.
//!
//! `last_error` is cleared when a command starts and set when it fails.
//! `is_loading` is driven by `refresh` alone.

mod state;

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::{self, JoinHandle};
use tokio_util::task::TaskTracker;
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::gateway::{RemoteTodoGateway, TodoGateway};
use crate::types::TodoItem;

pub use state::StoreSnapshot;
use state::StoreState;

/// Store wired to the HTTP gateway.
pub type RemoteTodoStore = TodoStore<RemoteTodoGateway>;

struct Shared {
    state: Mutex<StoreState>,
    changes: watch::Sender<StoreSnapshot>,
    tasks: TaskTracker,
    // Serializes `wait_idle` so one caller's reopen cannot strand another.
    idle: tokio::sync::Mutex<()>,
}

/// Owner of the authoritative local todo collection.
pub struct TodoStore<G> {
    gateway: Arc<G>,
    shared: Arc<Shared>,
}

impl<G> Clone for TodoStore<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl RemoteTodoStore {
    pub fn connect(config: &ClientConfig) -> Self {
        Self::new(RemoteTodoGateway::new(config))
    }
}

impl<G: TodoGateway> TodoStore<G> {
    /// Empty, idle store.
    pub fn new(gateway: G) -> Self {
        let (changes, _) = watch::channel(StoreSnapshot::default());
        Self {
            gateway: Arc::new(gateway),
            shared: Arc::new(Shared {
                state: Mutex::new(StoreState::default()),
                changes,
                tasks: TaskTracker::new(),
                idle: tokio::sync::Mutex::new(()),
            }),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.lock().snapshot()
    }

    pub fn items(&self) -> Vec<TodoItem> {
        self.snapshot().items
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot().is_loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.snapshot().last_error
    }

    pub fn has_error(&self) -> bool {
        self.snapshot().has_error()
    }

    /// Receiver that observes a fresh snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.shared.changes.subscribe()
    }

    /// Clears `last_error` on behalf of the presentation layer.
    pub fn dismiss_error(&self) {
        self.apply(StoreState::clear_error);
    }

    /// Replaces the whole collection with the server's list. On failure the
    /// previous collection is kept.
    #[instrument(level = "debug", skip(self))]
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let generation = self.apply(StoreState::begin_refresh);
        let result = self.call(|gateway| gateway.list()).await;
        let replaced = self.apply(|state| state.finish_refresh(generation, &result));

        match result {
            Ok(items) => {
                if replaced {
                    info!(count = items.len(), "todo list refreshed");
                } else {
                    debug!(generation, "newer refresh in flight, dropping stale list");
                }
                Ok(())
            }
            Err(error) => {
                warn!(%error, "refresh failed");
                Err(error)
            }
        }
    }

    /// Creates `draft` on the server and appends the returned item.
    #[instrument(level = "debug", skip(self, draft), fields(title = %draft.title))]
    pub async fn add(&self, draft: TodoItem) -> Result<TodoItem, ApiError> {
        self.apply(StoreState::clear_error);
        if let Some(id) = draft.id {
            return self.fail(
                "add",
                ApiError::InvalidRequest(format!("todo {id} is not a draft")),
            );
        }

        match self.call(move |gateway| gateway.create(&draft)).await {
            Ok(created) if created.is_draft() => self.fail(
                "add",
                ApiError::Decode("created todo has no id".to_string()),
            ),
            Ok(created) => {
                debug!(id = ?created.id, "todo created");
                self.apply(|state| state.append(created.clone()));
                Ok(created)
            }
            Err(error) => self.fail("add", error),
        }
    }

    /// Sends a full copy of `item` with `completed` inverted and swaps the
    /// server's answer into the collection at the same position.
    #[instrument(level = "debug", skip(self, item), fields(id = ?item.id))]
    pub async fn toggle_completion(&self, item: &TodoItem) -> Result<TodoItem, ApiError> {
        self.apply(StoreState::clear_error);
        if item.is_draft() {
            return self.fail("toggle", ApiError::missing_id("toggle"));
        }

        let toggled = item.toggled();
        match self.call(move |gateway| gateway.update(&toggled)).await {
            Ok(updated) => {
                if !self.apply(|state| state.replace_by_id(&updated)) {
                    debug!("toggled todo is no longer held locally, result discarded");
                }
                Ok(updated)
            }
            Err(error) => self.fail("toggle", error),
        }
    }

    /// Deletes `item` on the server and drops it locally. Drafts are ignored.
    #[instrument(level = "debug", skip(self, item), fields(id = ?item.id))]
    pub async fn remove(&self, item: &TodoItem) -> Result<(), ApiError> {
        let Some(id) = item.id else {
            debug!("draft has nothing to delete");
            return Ok(());
        };
        self.apply(StoreState::clear_error);

        match self.call(move |gateway| gateway.delete(id)).await {
            Ok(()) => {
                self.apply(|state| state.remove_by_id(id));
                Ok(())
            }
            Err(error) => self.fail("remove", error),
        }
    }

    /// Runs `refresh` as a tracked background task. Failures end up in
    /// `last_error`.
    pub fn spawn_refresh(&self) -> JoinHandle<()> {
        let store = self.clone();
        self.shared.tasks.spawn(async move {
            let _ = store.refresh().await;
        })
    }

    /// Runs `toggle_completion` as a tracked background task.
    pub fn spawn_toggle_completion(&self, item: TodoItem) -> JoinHandle<()> {
        let store = self.clone();
        self.shared.tasks.spawn(async move {
            let _ = store.toggle_completion(&item).await;
        })
    }

    /// Runs `remove` as a tracked background task.
    pub fn spawn_remove(&self, item: TodoItem) -> JoinHandle<()> {
        let store = self.clone();
        self.shared.tasks.spawn(async move {
            let _ = store.remove(&item).await;
        })
    }

    /// Number of spawned commands still running.
    pub fn pending_tasks(&self) -> usize {
        self.shared.tasks.len()
    }

    /// Waits until every command spawned so far has finished. Concurrent
    /// callers take turns; commands spawned while waiting are waited on too.
    pub async fn wait_idle(&self) {
        let _turn = self.shared.idle.lock().await;
        self.shared.tasks.close();
        self.shared.tasks.wait().await;
        self.shared.tasks.reopen();
    }

    async fn call<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&G) -> Result<T, ApiError> + Send + 'static,
    {
        let gateway = Arc::clone(&self.gateway);
        match task::spawn_blocking(move || op(gateway.as_ref())).await {
            Ok(result) => result,
            Err(e) => Err(ApiError::Transport(format!("gateway call aborted: {e}"))),
        }
    }

    fn fail<T>(&self, operation: &'static str, error: ApiError) -> Result<T, ApiError> {
        warn!(operation, %error, "todo command failed");
        self.apply(|state| state.record_error(&error));
        Err(error)
    }

    /// The only place state is mutated. Publishes the resulting snapshot
    /// before the lock is released.
    fn apply<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        let mut state = self.lock();
        let out = f(&mut state);
        self.shared.changes.send_replace(state.snapshot());
        out
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
