//! HTTP exchange types shared by `TodoClient` and transports.
//!
//! # Design
//! Requests and responses are plain owned data. `TodoClient` produces
//! `HttpRequest` values and consumes `HttpResponse` values; a `Transport`
//! sits in between and is the only piece that touches the network.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range_covers_all_2xx() {
        let ok = |status| HttpResponse { status, body: String::new() }.is_success();
        assert!(ok(200));
        assert!(ok(201));
        assert!(ok(204));
        assert!(!ok(199));
        assert!(!ok(301));
        assert!(!ok(404));
        assert!(!ok(500));
    }
}
