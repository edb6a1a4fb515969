use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde_json::Value;
use tracing::{debug, warn};

use super::models::RequestError;
use super::transport::{OutgoingRequest, ReqwestTransport, Transport};
use crate::api::diagnostics::{self, Diagnostic, DiagnosticSink, TracingSink};
use crate::config::ClientConfig;

pub const API_KEY_HEADER: &str = "X-API-Key";
pub const ORGANIZATION_ID_HEADER: &str = "X-Organization-ID";

/// JSON HTTP client bound to one Regulus API base URL
#[derive(Clone)]
pub struct HttpClient {
    base_url: Url,
    timeout: Duration,
    headers: HeaderMap,
    transport: Arc<dyn Transport>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl HttpClient {
    /// Create a client using `reqwest` and logging diagnostics through `tracing`
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url().clone(),
            timeout: config.timeout(),
            headers: Self::default_headers(config),
            transport: Arc::new(ReqwestTransport::new()),
            diagnostics: Arc::new(TracingSink),
        }
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    fn default_headers(config: &ClientConfig) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("x-api-key"),
            config.api_key().clone(),
        );
        headers.insert(
            HeaderName::from_static("x-organization-id"),
            config.organization_id().clone(),
        );
        headers
    }

    /// Merge `headers` into the current ones. Keys already present are
    /// overwritten, others are kept.
    pub fn set_headers(&mut self, headers: HeaderMap) {
        let mut current: Option<HeaderName> = None;
        for (name, value) in headers {
            match name {
                Some(name) => {
                    self.headers.insert(name.clone(), value);
                    current = Some(name);
                }
                // extra value for the previous name
                None => {
                    if let Some(name) = &current {
                        self.headers.append(name, value);
                    }
                }
            }
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Hand `diagnostic` to the sink; a panicking sink is logged and ignored
    fn report(&self, diagnostic: &Diagnostic) {
        let sink = &self.diagnostics;
        if panic::catch_unwind(AssertUnwindSafe(|| sink.report(diagnostic))).is_err() {
            warn!("Diagnostic sink panicked while reporting: {}", diagnostic);
        }
    }

    /// POST `body` as JSON to `endpoint` and return the decoded response body
    pub async fn post(&self, endpoint: &str, body: Value) -> Result<Value, RequestError> {
        let request = OutgoingRequest {
            method: Method::POST,
            url: self.url_for(endpoint),
            headers: self.headers.clone(),
            timeout: self.timeout,
            body,
        };
        debug!("POST {} (timeout {}ms)", request.url, self.timeout.as_millis());

        match self.transport.send(request).await {
            Ok(data) => Ok(data),
            Err(failure) => {
                if let Some(diagnostic) = diagnostics::diagnose(&failure) {
                    self.report(&diagnostic);
                }
                Err(RequestError::new(Method::POST, endpoint, &failure))
            }
        }
    }
}
