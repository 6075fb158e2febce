//! HTTP request and response described as plain data.
//!
//! # Design
//! The request builder produces an `HttpRequest` without touching the
//! network, and transports hand back an `HttpResponse` that is interpreted
//! here. Keeping the status/body check in one place means the blocking and
//! async transports agree on what counts as a failure.

use serde_json::Value;

use crate::error::TransportError;

/// HTTP method for a request. The API only serves reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

/// A request against one endpoint, built by `build_request`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Base url joined with `path`.
    pub url: String,
    /// The endpoint's fixed path, e.g. `/public_power`.
    pub path: &'static str,
    /// Query parameters in the order they are sent.
    pub params: Vec<(String, String)>,
}

impl HttpRequest {
    /// Look up a query parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A response as returned by a transport.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Decode the body as JSON if the status is 200.
    pub fn into_json(self) -> Result<Value, TransportError> {
        if self.status != 200 {
            return Err(TransportError::Status {
                status: self.status,
                body: self.body,
            });
        }
        serde_json::from_str(&self.body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}
