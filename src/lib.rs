//! Client for the Regulus transactions API.
//!
//! ```no_run
//! use regulus_sdk::{ClientConfig, TransactionClient, TransactionRecord};
//!
//! # async fn run() -> Result<(), regulus_sdk::SdkError> {
//! let config = ClientConfig::builder()
//!     .base_url("https://api.example.com")
//!     .api_key("my-api-key")
//!     .organization_id("my-org")
//!     .build()?;
//! let client = TransactionClient::new(&config);
//!
//! let record = TransactionRecord::new(
//!     "txn_00981", "user_002", 3000.0, "USD", "US", "2024-01-15T10:30:00Z",
//! );
//! let response = client.submit_transaction(&record).await?;
//! println!("{}", response);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod validation;

pub use api::diagnostics::{Diagnostic, DiagnosticSink, SilentSink, TracingSink};
pub use api::http::{ReqwestTransport, RequestError, Transport, TransportFailure};
pub use client::TransactionClient;
pub use config::{ClientConfig, ConfigError};
pub use error::SdkError;
pub use models::TransactionRecord;
pub use validation::{validate, ValidationError};

pub use reqwest::header;
