use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderValue;
use reqwest::Url;
use thiserror::Error;

/// Default request timeout (2 minutes)
pub const DEFAULT_TIMEOUT_MS: u64 = 120_000;

/// Errors raised while building a [`ClientConfig`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Base URL is required")]
    MissingBaseUrl,
    #[error("API Key is required")]
    MissingApiKey,
    #[error("Organization ID is required")]
    MissingOrganizationId,
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Invalid value for header {0}")]
    InvalidHeaderValue(&'static str),
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),
}

/// Connection settings for the Regulus API, validated at construction
#[derive(Clone)]
pub struct ClientConfig {
    base_url: Url,
    api_key: HeaderValue,
    organization_id: HeaderValue,
    timeout: Duration,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Build the configuration from `BASE_URL`, `API_KEY`, `ORGANIZATION_ID`
    /// and the optional `REQUEST_TIMEOUT_MS` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] but reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();
        if let Some(base_url) = lookup("BASE_URL") {
            builder = builder.base_url(base_url);
        }
        if let Some(api_key) = lookup("API_KEY") {
            builder = builder.api_key(api_key);
        }
        if let Some(organization_id) = lookup("ORGANIZATION_ID") {
            builder = builder.organization_id(organization_id);
        }
        if let Some(raw) = lookup("REQUEST_TIMEOUT_MS").filter(|s| !s.trim().is_empty()) {
            let ms = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidTimeout(format!("REQUEST_TIMEOUT_MS={}: {}", raw, e)))?;
            builder = builder.timeout_ms(ms);
        }
        builder.build()
    }

    /// Absolute base URL every endpoint is joined to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Value of the `X-API-Key` header, marked sensitive
    pub fn api_key(&self) -> &HeaderValue {
        &self.api_key
    }

    /// Value of the `X-Organization-ID` header
    pub fn organization_id(&self) -> &HeaderValue {
        &self.organization_id
    }

    /// Per-request timeout, 120000 ms unless configured
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("organization_id", &self.organization_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Collects raw settings; empty strings count as absent
#[derive(Debug, Default, Clone)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    organization_id: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn organization_id(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout_ms(self, ms: u64) -> Self {
        self.timeout(Duration::from_millis(ms))
    }

    /// Validate the collected settings.
    ///
    /// Required values are checked in order: base URL, API key, organization ID.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let base_url = non_empty(self.base_url).ok_or(ConfigError::MissingBaseUrl)?;
        let api_key = non_empty(self.api_key).ok_or(ConfigError::MissingApiKey)?;
        let organization_id =
            non_empty(self.organization_id).ok_or(ConfigError::MissingOrganizationId)?;

        let base_url = Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_string()));
        }

        let mut api_key = HeaderValue::from_str(&api_key)
            .map_err(|_| ConfigError::InvalidHeaderValue("X-API-Key"))?;
        api_key.set_sensitive(true);
        let organization_id = HeaderValue::from_str(&organization_id)
            .map_err(|_| ConfigError::InvalidHeaderValue("X-Organization-ID"))?;

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_millis(DEFAULT_TIMEOUT_MS));
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout("timeout must be positive".to_string()));
        }

        Ok(ClientConfig {
            base_url,
            api_key,
            organization_id,
            timeout,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
