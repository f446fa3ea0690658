//! The store's mutable state and its reconciliation rules.
//!
//! Everything here is synchronous and I/O free; `TodoStore` calls these
//! methods while holding its state lock.

use crate::error::ApiError;
use crate::types::{TodoId, TodoItem};

/// Owned copy of everything the presentation layer may observe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub items: Vec<TodoItem>,
    pub is_loading: bool,
    pub last_error: Option<String>,
}

impl StoreSnapshot {
    /// Whether an error message should be shown.
    pub fn has_error(&self) -> bool {
        self.last_error.is_some()
    }
}

#[derive(Debug, Default)]
pub(crate) struct StoreState {
    items: Vec<TodoItem>,
    last_error: Option<String>,
    refreshes_in_flight: usize,
    latest_refresh: u64,
}

impl StoreState {
    pub(crate) fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            items: self.items.clone(),
            is_loading: self.refreshes_in_flight > 0,
            last_error: self.last_error.clone(),
        }
    }

    pub(crate) fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub(crate) fn record_error(&mut self, error: &ApiError) {
        self.last_error = Some(error.to_string());
    }

    /// Marks a refresh as started and returns its generation.
    pub(crate) fn begin_refresh(&mut self) -> u64 {
        self.clear_error();
        self.refreshes_in_flight += 1;
        self.latest_refresh += 1;
        self.latest_refresh
    }

    /// Settles the refresh started as `generation`. Only the most recently
    /// started refresh may replace the collection; older results are dropped.
    /// Returns whether the collection was replaced.
    pub(crate) fn finish_refresh(
        &mut self,
        generation: u64,
        result: &Result<Vec<TodoItem>, ApiError>,
    ) -> bool {
        self.refreshes_in_flight = self.refreshes_in_flight.saturating_sub(1);
        match result {
            Ok(items) if generation == self.latest_refresh => {
                self.items = items.clone();
                true
            }
            Ok(_) => false,
            Err(error) => {
                self.record_error(error);
                false
            }
        }
    }

    /// Adds a freshly created item at the tail. An item whose id is already
    /// held replaces that entry instead, keeping ids unique.
    pub(crate) fn append(&mut self, item: TodoItem) {
        if item.id.is_some() && self.replace_by_id(&item) {
            return;
        }
        self.items.push(item);
    }

    /// Replaces the entry with the same id in place. Returns `false`, leaving
    /// the collection untouched, when no such entry exists.
    pub(crate) fn replace_by_id(&mut self, item: &TodoItem) -> bool {
        let Some(id) = item.id else {
            return false;
        };
        match self.items.iter_mut().find(|held| held.id == Some(id)) {
            Some(held) => {
                *held = item.clone();
                true
            }
            None => false,
        }
    }

    /// Removes every entry carrying `id` and returns how many went away.
    pub(crate) fn remove_by_id(&mut self, id: TodoId) -> usize {
        let before = self.items.len();
        self.items.retain(|held| held.id != Some(id));
        before - self.items.len()
    }
}
