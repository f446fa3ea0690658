//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only the resource URL and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. A `Transport` executes the round-trip in between, so this
//! module stays deterministic and free of I/O.
//!
//! Every `parse_*` rejects non-2xx responses with `ApiError::Status` before
//! looking at the body.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{TodoId, TodoItem};

/// Path of the todo collection resource, relative to the server origin.
pub const RESOURCE_PATH: &str = "/api/todos";

/// Synchronous, stateless request builder for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    resource_url: String,
}

impl TodoClient {
    /// `base_url` is the server origin, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            resource_url: format!("{}{RESOURCE_PATH}", base_url.trim().trim_end_matches('/')),
        }
    }

    pub fn resource_url(&self) -> &str {
        &self.resource_url
    }

    pub fn build_list(&self) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: self.collection_url()?,
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn build_create(&self, item: &TodoItem) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.collection_url()?,
            headers: json_headers(),
            body: Some(encode(item)?),
        })
    }

    /// PUT of the full item to `{resource}/{id}`. Fails without building a
    /// request when the item has no id.
    pub fn build_update(&self, item: &TodoItem) -> Result<HttpRequest, ApiError> {
        let id = item.id.ok_or_else(|| ApiError::missing_id("update"))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: self.item_url(id)?,
            headers: json_headers(),
            body: Some(encode(item)?),
        })
    }

    pub fn build_delete(&self, id: TodoId) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            url: self.item_url(id)?,
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<TodoItem>, ApiError> {
        decode(response)
    }

    /// The returned todo must carry its server-assigned id.
    pub fn parse_create(&self, response: HttpResponse) -> Result<TodoItem, ApiError> {
        decode(response).and_then(persisted)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<TodoItem, ApiError> {
        decode(response).and_then(persisted)
    }

    /// Only the status is checked; the body is ignored.
    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn collection_url(&self) -> Result<String, ApiError> {
        if self.resource_url.starts_with("http://") || self.resource_url.starts_with("https://") {
            Ok(self.resource_url.clone())
        } else {
            Err(ApiError::InvalidRequest(format!(
                "resource url {} is not an http(s) url",
                self.resource_url
            )))
        }
    }

    fn item_url(&self, id: TodoId) -> Result<String, ApiError> {
        Ok(format!("{}/{id}", self.collection_url()?))
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn encode(item: &TodoItem) -> Result<String, ApiError> {
    serde_json::to_string(item).map_err(|e| ApiError::InvalidRequest(e.to_string()))
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn persisted(item: TodoItem) -> Result<TodoItem, ApiError> {
    if item.is_draft() {
        return Err(ApiError::Decode("response todo has no id".to_string()));
    }
    Ok(item)
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}
