//! Error types for the todo gateway and store.
//!
//! # Design
//! The gateway distinguishes four failure kinds so callers and logs can tell
//! them apart. The store surfaces all of them the same way: as the rendered
//! message in `last_error`.

use thiserror::Error;

/// Errors returned by `TodoClient`, transports, gateways and the store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request could not be sent or no response was received.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// A precondition for building the request was not met.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub(crate) fn missing_id(operation: &str) -> Self {
        ApiError::InvalidRequest(format!("{operation} requires a todo with an id"))
    }
}
