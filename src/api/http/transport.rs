use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use super::models::{FailureBody, TransportFailure};

/// Fully resolved request handed to a [`Transport`]
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub timeout: Duration,
    pub body: Value,
}

/// Sends requests over the wire
///
/// Implementations return the decoded JSON body for 2xx responses and a
/// [`TransportFailure`] for everything else.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: OutgoingRequest) -> Result<Value, TransportFailure>;
}

/// [`Transport`] backed by `reqwest`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
        }
    }

    /// Reuse an existing client (proxy, TLS settings, ...)
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    fn request_failure(error: &reqwest::Error, timeout: Duration) -> TransportFailure {
        if error.is_timeout() {
            TransportFailure::network(format!("timeout of {}ms exceeded", timeout.as_millis()))
        } else {
            TransportFailure::network(error.to_string())
        }
    }

    fn status_failure(status: StatusCode, body: Option<&str>) -> TransportFailure {
        let data = body.and_then(|b| serde_json::from_str::<FailureBody>(b).ok());
        TransportFailure::status(status.as_u16(), data)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<Value, TransportFailure> {
        let timeout = request.timeout;

        let response = self
            .http_client
            .request(request.method, request.url.as_str())
            .headers(request.headers)
            .timeout(timeout)
            .json(&request.body)
            .send()
            .await
            .map_err(|e| Self::request_failure(&e, timeout))?;

        let status = response.status();
        let body_text = response.text().await;

        // an unreadable error body still keeps its status
        if !status.is_success() {
            return Err(Self::status_failure(status, body_text.ok().as_deref()));
        }

        let body_text = body_text.map_err(|e| Self::request_failure(&e, timeout))?;

        if body_text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body_text)
            .map_err(|e| TransportFailure::network(format!("Failed to parse response: {}", e)))
    }
}
