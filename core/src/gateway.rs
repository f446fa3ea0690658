//! The gateway: the only component that performs network I/O for todo data.

use tracing::instrument;

use crate::client::TodoClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::{Transport, UreqTransport};
use crate::types::{TodoId, TodoItem};

/// The four logical operations the store needs from the remote API.
///
/// Calls are blocking and independent of each other; implementations keep
/// no mutable state between calls.
pub trait TodoGateway: Send + Sync + 'static {
    fn list(&self) -> Result<Vec<TodoItem>, ApiError>;
    fn create(&self, item: &TodoItem) -> Result<TodoItem, ApiError>;
    /// Fails with `ApiError::InvalidRequest` when `item.id` is absent.
    fn update(&self, item: &TodoItem) -> Result<TodoItem, ApiError>;
    fn delete(&self, id: TodoId) -> Result<(), ApiError>;
}

/// `TodoGateway` over HTTP: `TodoClient` builds and parses, `T` executes.
#[derive(Debug, Clone)]
pub struct RemoteTodoGateway<T = UreqTransport> {
    client: TodoClient,
    transport: T,
}

impl RemoteTodoGateway<UreqTransport> {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> RemoteTodoGateway<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            client: TodoClient::new(&config.base_url),
            transport,
        }
    }
}

impl<T: Transport + 'static> TodoGateway for RemoteTodoGateway<T> {
    #[instrument(level = "debug", skip(self))]
    fn list(&self) -> Result<Vec<TodoItem>, ApiError> {
        let request = self.client.build_list()?;
        self.client.parse_list(self.transport.execute(request)?)
    }

    #[instrument(level = "debug", skip(self, item), fields(title = %item.title))]
    fn create(&self, item: &TodoItem) -> Result<TodoItem, ApiError> {
        let request = self.client.build_create(item)?;
        self.client.parse_create(self.transport.execute(request)?)
    }

    #[instrument(level = "debug", skip(self, item), fields(id = ?item.id))]
    fn update(&self, item: &TodoItem) -> Result<TodoItem, ApiError> {
        let request = self.client.build_update(item)?;
        self.client.parse_update(self.transport.execute(request)?)
    }

    #[instrument(level = "debug", skip(self))]
    fn delete(&self, id: TodoId) -> Result<(), ApiError> {
        let request = self.client.build_delete(id)?;
        self.client.parse_delete(self.transport.execute(request)?)
    }
}
