use super::{RawRequest, RawResponse, Transport, TransportError, TransportRequest};
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Request timeout applied when the caller does not choose one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(32)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client (proxies, custom TLS roots, ...).
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn parse_body(text: &str) -> std::result::Result<serde_json::Value, serde_json::Error> {
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(text)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<serde_json::Value, TransportError> {
        let url = request.full_url();
        let mut builder = self.client.request(request.method.into(), &url);
        for (k, v) in &request.headers {
            builder = builder.header(k, v);
        }
        if let Some(data) = &request.data {
            builder = builder.json(data);
        }
        let http_request = builder
            .build()
            .map_err(|e| TransportError::setup(format!("Failed to build request: {}", e)))?;

        let raw_request = RawRequest {
            method: request.method,
            url,
        };

        let response = self.client.execute(http_request).await.map_err(|e| {
            TransportError::no_response(format!("Request failed: {}", e), raw_request.clone())
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            TransportError::with_response(
                format!("Failed to read response: {}", e),
                Some(raw_request.clone()),
                RawResponse {
                    status: status.as_u16(),
                    data: serde_json::Value::Null,
                },
            )
        })?;

        if !status.is_success() {
            let data = parse_body(&text).unwrap_or(serde_json::Value::String(text));
            return Err(TransportError::with_response(
                format!("HTTP {}", status),
                Some(raw_request),
                RawResponse {
                    status: status.as_u16(),
                    data,
                },
            ));
        }

        parse_body(&text).map_err(|e| {
            TransportError::with_response(
                format!("Invalid JSON in response body: {}", e),
                Some(raw_request),
                RawResponse {
                    status: status.as_u16(),
                    data: serde_json::Value::String(text.clone()),
                },
            )
        })
    }
}
