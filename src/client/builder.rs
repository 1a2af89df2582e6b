use super::core::{EpigosClient, DEFAULT_BASE_URL};
use crate::transport::{HttpTransport, Transport};
use crate::{Error, ErrorContext, Result};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Credentials and endpoint for an [`EpigosClient`].
///
/// Deserializable so applications can keep it in their own config files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    pub api_key: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// Builder for creating clients with custom configuration.
pub struct EpigosClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn Transport>>,
}

impl EpigosClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout: None,
            transport: None,
        }
    }

    /// Take api key and base URL from a [`ClientConfig`].
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.api_key = Some(config.api_key);
        self.base_url = config.base_url;
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Request timeout for the default HTTP transport. Ignored when a custom
    /// transport is injected.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Inject a transport instead of the default [`HttpTransport`].
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<EpigosClient> {
        let api_key = self
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "apiKey required",
                    ErrorContext::new()
                        .with_field_path("api_key")
                        .with_source("client_builder"),
                )
            })?;

        let base_url = match self.base_url {
            Some(url) if !url.trim().is_empty() => {
                validate_base_url(&url)?;
                url
            }
            _ => DEFAULT_BASE_URL.to_string(),
        };

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(match self.timeout {
                Some(timeout) => HttpTransport::with_timeout(timeout)?,
                None => HttpTransport::new()?,
            }),
        };

        Ok(EpigosClient::from_parts(api_key, base_url, transport))
    }
}

impl Default for EpigosClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_base_url(raw: &str) -> Result<()> {
    let parsed = url::Url::parse(raw).map_err(|e| {
        Error::configuration_with_context(
            format!("Invalid base URL: {}", e),
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(raw)
                .with_source("client_builder"),
        )
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::configuration_with_context(
            format!("Unsupported base URL scheme: {}", other),
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(raw)
                .with_source("client_builder"),
        )),
    }
}
