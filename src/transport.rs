//! Transport capability: performs exactly one HTTP exchange per call.
//!
//! The client never talks to the network directly. It hands a fully merged
//! [`TransportRequest`] to a [`Transport`] and gets back either the decoded
//! response body or a [`TransportError`] describing how far the exchange got.
//! [`HttpTransport`] is the default reqwest-backed implementation; tests and
//! applications with special networking needs may inject their own.

mod http;

#[cfg(test)]
pub(crate) mod recording;

pub use http::{HttpTransport, DEFAULT_TIMEOUT};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// HTTP verbs supported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A request after the client merged in base URL and headers.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: HttpMethod,
    /// Path relative to `base_url`, e.g. `/predict/classify/{id}/`.
    pub url: String,
    pub base_url: String,
    pub headers: BTreeMap<String, String>,
    pub data: Option<serde_json::Value>,
}

impl TransportRequest {
    /// Absolute URL obtained by joining `base_url` and `url`.
    pub fn full_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.url.starts_with('/') {
            format!("{}{}", base, self.url)
        } else {
            format!("{}/{}", base, self.url)
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// What was sent, kept for diagnostics. Headers are left out so the API key
/// never travels inside an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRequest {
    pub method: HttpMethod,
    pub url: String,
}

/// What came back from a failed exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    /// Parsed JSON body, or the raw text as a JSON string when it was not JSON.
    pub data: serde_json::Value,
}

/// Failure raised by a [`Transport`].
///
/// `request` is present once the request left the process; `response` is
/// present once the remote end answered.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Transport error: {message}")]
pub struct TransportError {
    pub message: String,
    pub request: Option<RawRequest>,
    pub response: Option<RawResponse>,
}

impl TransportError {
    /// The request could not be built or dispatched.
    pub fn setup(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            request: None,
            response: None,
        }
    }

    /// The request was sent but no response arrived.
    pub fn no_response(message: impl Into<String>, request: RawRequest) -> Self {
        Self {
            message: message.into(),
            request: Some(request),
            response: None,
        }
    }

    /// The remote end answered with a failure.
    pub fn with_response(
        message: impl Into<String>,
        request: Option<RawRequest>,
        response: RawResponse,
    ) -> Self {
        Self {
            message: message.into(),
            request,
            response: Some(response),
        }
    }
}

/// A single-shot HTTP exchange.
///
/// Implementations must not retry. Cancellation is dropping the returned future.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<serde_json::Value, TransportError>;
}
