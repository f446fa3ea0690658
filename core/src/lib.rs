//! Client-side synchronization layer for a remote todo API.
//!
//! # Overview
//! `TodoStore` owns a local, ordered collection of todos and keeps it in
//! step with the server through a `TodoGateway`. A presentation layer calls
//! the store's commands (`refresh`, `add`, `toggle_completion`, `remove`)
//! and renders its snapshot (`items`, `is_loading`, `last_error`).
//!
//! # Design
//! - `TodoClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network.
//! - A `Transport` performs the round-trip; `UreqTransport` is the default.
//! - `RemoteTodoGateway` glues the two behind the `TodoGateway` trait, which
//!   is also the seam tests fake.
//! - The store reconciles by id, never by content, and never mutates its
//!   collection when a command fails.

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;

pub use client::TodoClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use gateway::{RemoteTodoGateway, TodoGateway};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{RemoteTodoStore, StoreSnapshot, TodoStore};
pub use transport::{Transport, UreqTransport};
pub use types::{TodoId, TodoItem};
