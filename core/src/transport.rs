//! Blocking and non-blocking "GET JSON" capabilities.
//!
//! The facade is generic over these traits so tests can swap in a fake
//! transport. `HttpTransport` is the real one: `ureq` for blocking calls,
//! `reqwest` for async calls. Neither retries nor adds timeouts of its own.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::http::HttpResponse;

/// Largest body the blocking transport will read. A year of quarter-hourly
/// data across all production types stays well below this.
const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Blocking GET returning parsed JSON.
pub trait Transport {
    fn get_json(&self, url: &str, params: &[(String, String)]) -> Result<Value, TransportError>;
}

/// Non-blocking GET returning parsed JSON.
#[async_trait]
pub trait AsyncTransport: Send + Sync {
    async fn get_json(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<Value, TransportError>;
}

/// Transport backed by real HTTP clients.
#[derive(Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Reuse an existing async client (and its connection pool).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            agent: agent(),
            client,
        }
    }
}

// Non-200 statuses come back as data so `HttpResponse` can classify them the
// same way for both transports.
fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &str, params: &[(String, String)]) -> Result<Value, TransportError> {
        let mut request = self.agent.get(url);
        for (key, value) in params {
            request = request.query(key, value);
        }
        let mut response = request
            .call()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_string()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        HttpResponse { status, body }.into_json()
    }
}

#[async_trait]
impl AsyncTransport for HttpTransport {
    async fn get_json(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<Value, TransportError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        HttpResponse { status, body }.into_json()
    }
}
