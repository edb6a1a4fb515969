use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderMap;
use serde_json::Value;
use tracing::{debug, info};

use crate::api::diagnostics::DiagnosticSink;
use crate::api::http::{HttpClient, Transport};
use crate::config::ClientConfig;
use crate::error::SdkError;
use crate::models::TransactionRecord;
use crate::validation;

/// Endpoint receiving transactions
pub const TRANSACTIONS_ENDPOINT: &str = "/transactions";

/// Regulus API client for submitting transactions
///
/// Cloning is cheap and clones share the transport. Concurrent calls to
/// [`TransactionClient::submit_transaction`] only read the configuration;
/// [`TransactionClient::set_headers`] needs `&mut self`, so update headers
/// before handing the client to concurrent tasks.
#[derive(Clone)]
pub struct TransactionClient {
    http_client: HttpClient,
}

impl TransactionClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http_client: HttpClient::new(config),
        }
    }

    /// Create a client from `BASE_URL`, `API_KEY`, `ORGANIZATION_ID` and `REQUEST_TIMEOUT_MS`
    pub fn from_env() -> Result<Self, SdkError> {
        let config = ClientConfig::from_env()?;
        Ok(Self::new(&config))
    }

    /// Replace the HTTP transport (custom reqwest client, test double, ...)
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.http_client = self.http_client.with_transport(transport);
        self
    }

    /// Replace where 401/400 hints are reported
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.http_client = self.http_client.with_diagnostics(diagnostics);
        self
    }

    /// Add custom headers; existing headers stay unless overridden by the same name
    pub fn set_headers(&mut self, headers: HeaderMap) {
        self.http_client.set_headers(headers);
    }

    pub fn headers(&self) -> &HeaderMap {
        self.http_client.headers()
    }

    pub fn timeout(&self) -> Duration {
        self.http_client.timeout()
    }

    /// Validate `record` and POST it to `/transactions`
    ///
    /// # Returns
    /// * `Ok(Value)` - Response body, unchanged
    /// * `Err(SdkError::Validation)` - Record rejected, nothing was sent
    /// * `Err(SdkError::Transport)` - Request failed, e.g. `POST /transactions failed: Unauthorized`
    pub async fn submit_transaction(&self, record: &TransactionRecord) -> Result<Value, SdkError> {
        validation::validate(record)?;

        let body = serde_json::to_value(record)?;
        debug!(
            "Submitting transaction {}",
            record.transaction_id.as_deref().unwrap_or_default()
        );

        let response = self.http_client.post(TRANSACTIONS_ENDPOINT, body).await?;
        info!(
            "Transaction {} accepted",
            record.transaction_id.as_deref().unwrap_or_default()
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;
    use serde_json::json;

    use super::*;
    use crate::api::diagnostics::testing::RecordingSink;
    use crate::api::http::client::testing::RecordingTransport;
    use crate::api::http::{FailureBody, TransportFailure, ORGANIZATION_ID_HEADER};
    use crate::validation::ValidationError;

    fn config() -> ClientConfig {
        ClientConfig::builder()
            .base_url("http://localhost:3000")
            .api_key("test_api_key")
            .organization_id("test_organization_id")
            .build()
            .unwrap()
    }

    fn transaction() -> TransactionRecord {
        TransactionRecord::new(
            "txn_00981",
            "user_002",
            3_000_000.0,
            "USD",
            "US",
            "2024-01-15T10:30:00.000Z",
        )
    }

    fn client_responding(result: Result<Value, TransportFailure>) -> (TransactionClient, Arc<RecordingTransport>) {
        let transport = RecordingTransport::respond_with(result);
        let client = TransactionClient::new(&config())
            .with_transport(transport.clone())
            .with_diagnostics(Arc::new(RecordingSink::default()));
        (client, transport)
    }

    #[test]
    fn test_default_timeout() {
        let client = TransactionClient::new(&config());
        assert_eq!(client.timeout().as_millis(), 120_000);
    }

    #[tokio::test]
    async fn test_submit_success() {
        let (client, transport) = client_responding(Ok(json!({ "success": true })));

        let response = client.submit_transaction(&transaction()).await.unwrap();
        assert_eq!(response, json!({ "success": true }));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://localhost:3000/transactions");
        assert_eq!(requests[0].body, serde_json::to_value(transaction()).unwrap());
    }

    #[tokio::test]
    async fn test_validation_failure_skips_network() {
        let (client, transport) = client_responding(Ok(json!({ "success": true })));
        let mut record = transaction();
        record.currency = Some("USDA".to_string());

        let err = client.submit_transaction(&record).await.unwrap_err();
        assert!(matches!(err, SdkError::Validation(ValidationError::InvalidCurrency)));
        assert_eq!(err.to_string(), "Currency must be a 3-letter code");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized_surfaces_response_message() {
        let (client, _) = client_responding(Err(TransportFailure::status(
            401,
            Some(FailureBody {
                message: Some("Unauthorized".to_string()),
            }),
        )));

        let err = client.submit_transaction(&transaction()).await.unwrap_err();
        assert_eq!(err.reason(), "Unauthorized");
        assert_eq!(err.to_string(), "POST /transactions failed: Unauthorized");
        match err {
            SdkError::Transport(e) => assert_eq!(e.status(), Some(401)),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_surfaces_response_message() {
        let (client, _) = client_responding(Err(TransportFailure::status(
            500,
            Some(FailureBody {
                message: Some("Internal Server Error".to_string()),
            }),
        )));

        let err = client.submit_transaction(&transaction()).await.unwrap_err();
        assert_eq!(err.reason(), "Internal Server Error");
    }

    #[tokio::test]
    async fn test_network_error() {
        let (client, _) = client_responding(Err(TransportFailure::network("Network Error")));

        let err = client.submit_transaction(&transaction()).await.unwrap_err();
        assert_eq!(err.reason(), "Network Error");
        assert_eq!(err.to_string(), "POST /transactions failed: Network Error");
    }

    #[tokio::test]
    async fn test_diagnostics_reported_before_error() {
        let sink = Arc::new(RecordingSink::default());
        let client = TransactionClient::new(&config())
            .with_transport(RecordingTransport::respond_with(Err(TransportFailure::status(401, None))))
            .with_diagnostics(sink.clone());

        let err = client.submit_transaction(&transaction()).await.unwrap_err();
        assert_eq!(err.reason(), "Request failed with status code 401");
        assert_eq!(
            sink.reports(),
            vec!["Unauthorized: Please check your API key or organization ID"]
        );
    }

    #[test]
    fn test_set_headers_keeps_organization_header() {
        let mut client = TransactionClient::new(&config());
        let mut custom = HeaderMap::new();
        custom.insert("custom-header", HeaderValue::from_static("CustomValue"));
        client.set_headers(custom);

        assert_eq!(client.headers()["custom-header"], "CustomValue");
        assert_eq!(client.headers()[ORGANIZATION_ID_HEADER], "test_organization_id");
    }
}
