use thiserror::Error;

use crate::api::http::RequestError;
use crate::config::ConfigError;
use crate::validation::ValidationError;

/// Any error returned by the SDK
#[derive(Debug, Error)]
pub enum SdkError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transport(#[from] RequestError),
    #[error("Failed to encode transaction: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl SdkError {
    /// Message without the request prefix for transport errors
    pub fn reason(&self) -> String {
        match self {
            SdkError::Transport(e) => e.reason().to_string(),
            other => other.to_string(),
        }
    }
}
