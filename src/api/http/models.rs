use reqwest::Method;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback reason when a failure carries no message at all
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Error body returned by the API, e.g. `{"message": "Unauthorized"}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailureBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Response part of a failed request, when the server answered
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FailureResponse {
    pub status: Option<u16>,
    pub data: Option<FailureBody>,
}

/// Raw failure reported by a [`super::Transport`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportFailure {
    pub message: Option<String>,
    pub response: Option<FailureResponse>,
}

impl TransportFailure {
    /// Failure without any server response (network error, timeout, ...)
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            response: None,
        }
    }

    /// Failure for a non-success HTTP status
    pub fn status(status: u16, data: Option<FailureBody>) -> Self {
        Self {
            message: Some(format!("Request failed with status code {}", status)),
            response: Some(FailureResponse {
                status: Some(status),
                data,
            }),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        self.response.as_ref().and_then(|r| r.status)
    }

    /// `message` field of the error body, if the server sent one
    pub fn response_message(&self) -> Option<&str> {
        self.response
            .as_ref()
            .and_then(|r| r.data.as_ref())
            .and_then(|d| d.message.as_deref())
            .filter(|m| !m.is_empty())
    }

    /// Body message, then transport message, then [`UNKNOWN_ERROR`]
    pub fn reason(&self) -> &str {
        self.response_message()
            .or_else(|| self.message.as_deref().filter(|m| !m.is_empty()))
            .unwrap_or(UNKNOWN_ERROR)
    }
}

/// Normalized failure of a request, e.g. `POST /transactions failed: Unauthorized`
#[derive(Debug, Clone, Error)]
#[error("{method} {endpoint} failed: {reason}")]
pub struct RequestError {
    method: Method,
    endpoint: String,
    reason: String,
    status: Option<u16>,
}

impl RequestError {
    pub fn new(method: Method, endpoint: &str, failure: &TransportFailure) -> Self {
        Self {
            method,
            endpoint: endpoint.to_string(),
            reason: failure.reason().to_string(),
            status: failure.status_code(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Message without the method/endpoint prefix
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}
