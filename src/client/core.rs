use super::builder::{ClientConfig, EpigosClientBuilder};
use super::normalize::normalize;
use crate::models::{ClassificationModel, ObjectDetectionModel};
use crate::transport::{HttpMethod, Transport, TransportRequest};
use crate::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Service endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.epigos.ai";

pub const API_KEY_HEADER: &str = "X-Api-Key";
pub const CLIENT_SDK_HEADER: &str = "X-Client-Sdk";
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Value of the client-identification header.
pub fn sdk_identifier() -> String {
    format!("Epigos-SDK/Rust; Version: {}", env!("CARGO_PKG_VERSION"))
}

/// A call against the API, relative to the client's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub data: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn post(url: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            data: Some(data),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            data: None,
        }
    }
}

/// Authenticated entry point to the Epigos API.
///
/// Cloning is cheap and every clone shares the same credentials and transport,
/// so one client can back any number of models and concurrent calls.
#[derive(Clone)]
pub struct EpigosClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    api_key: String,
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl EpigosClient {
    /// Create a client with the default HTTP transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        EpigosClientBuilder::new().config(config).build()
    }

    pub fn builder() -> EpigosClientBuilder {
        EpigosClientBuilder::new()
    }

    pub(crate) fn from_parts(
        api_key: String,
        base_url: String,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                api_key,
                base_url,
                transport,
            }),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.inner.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Classification model bound to this client.
    pub fn classification(&self, model_id: impl Into<String>) -> Result<ClassificationModel> {
        ClassificationModel::new(self.clone(), model_id)
    }

    /// Object detection model bound to this client.
    pub fn object_detection(&self, model_id: impl Into<String>) -> Result<ObjectDetectionModel> {
        ObjectDetectionModel::new(self.clone(), model_id)
    }

    /// Perform one authenticated call and return the response body as received.
    ///
    /// Transport failures are normalized into [`crate::Error::Api`],
    /// [`crate::Error::Timeout`] or [`crate::Error::Setup`]. Nothing is retried.
    pub async fn call_api(&self, request: ApiRequest) -> Result<serde_json::Value> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let transport_request = self.prepare(request, &request_id);
        debug!(
            method = %transport_request.method,
            path = %transport_request.url,
            request_id = %request_id,
            "dispatching Epigos API request"
        );

        match self.inner.transport.send(transport_request).await {
            Ok(body) => {
                debug!(request_id = %request_id, "Epigos API request succeeded");
                Ok(body)
            }
            Err(e) => {
                let err = normalize(e);
                warn!(
                    request_id = %request_id,
                    status = ?err.status(),
                    error = %err.message(),
                    "Epigos API request failed"
                );
                Err(err)
            }
        }
    }

    fn prepare(&self, request: ApiRequest, request_id: &str) -> TransportRequest {
        TransportRequest {
            method: request.method,
            url: request.url,
            base_url: self.inner.base_url.clone(),
            headers: self.headers(request_id),
            data: request.data,
        }
    }

    fn headers(&self, request_id: &str) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            (API_KEY_HEADER.to_string(), self.inner.api_key.clone()),
            (CLIENT_SDK_HEADER.to_string(), sdk_identifier()),
            (REQUEST_ID_HEADER.to_string(), request_id.to_string()),
        ])
    }
}

impl fmt::Debug for EpigosClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EpigosClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.inner.base_url)
            .finish()
    }
}
