//! The network seam between `TodoClient` and the todo API.
//!
//! # Design
//! A `Transport` executes one `HttpRequest` and hands back the raw
//! `HttpResponse`. Status interpretation belongs to `TodoClient`, so a
//! transport only fails when no response was obtained at all.

use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes HTTP requests. Implementations must be shareable across the
/// blocking tasks the store spawns.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a `ureq` agent.
///
/// The agent has status-code-as-error disabled so 4xx/5xx responses come
/// back as data and reach `TodoClient::parse_*`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let content_type = request
            .headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.as_str())
            .unwrap_or("application/json");

        let sent = match (request.method, request.body) {
            (HttpMethod::Get, _) => self.agent.get(&request.url).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&request.url).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&request.url)
                .content_type(content_type)
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&request.url).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(&request.url)
                .content_type(content_type)
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&request.url).send_empty(),
        };
        let mut response = sent.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(format!("reading response body: {e}")))?;
        debug!(status, bytes = body.len(), "received response");

        Ok(HttpResponse { status, body })
    }
}
