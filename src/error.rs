use crate::transport::{RawRequest, RawResponse};
use std::fmt;
use thiserror::Error;

/// Message used when a request was sent but no response came back.
pub const TIMEOUT_MESSAGE: &str = "server time out";

/// Status reported alongside [`TIMEOUT_MESSAGE`].
pub const TIMEOUT_STATUS: u16 = 503;

/// Message used when the request could not be dispatched at all.
pub const SETUP_FAILURE_MESSAGE: &str = "opps! something went wrong while setting up request";

/// Where a local check failed. Rendered after the message of
/// [`Error::Configuration`] and [`Error::Validation`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Offending input, e.g. `api_key` or `payload.confidence`.
    pub field_path: Option<String>,
    /// The rejected value or other detail.
    pub details: Option<String>,
    /// Component that ran the check, e.g. `client_builder` or `object_detection`.
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// ` (field: .., details: .., source: ..)` with absent parts skipped; empty when
/// nothing is set.
impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [
            ("field", &self.field_path),
            ("details", &self.details),
            ("source", &self.source),
        ];
        let mut sep = " (";
        for (label, value) in parts {
            if let Some(value) = value {
                write!(f, "{}{}: {}", sep, label, value)?;
                sep = ", ";
            }
        }
        if sep == ", " {
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// Unified error type for the Epigos SDK.
///
/// `Api`, `Timeout` and `Setup` are produced by normalizing a failed transport
/// call; `Configuration` and `Validation` are raised locally before any request
/// is sent.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{context}")]
    Validation {
        message: String,
        context: ErrorContext,
    },

    /// The API answered with a failure status.
    #[error("{message} (HTTP {status})")]
    Api {
        message: String,
        status: u16,
        details: Option<Vec<serde_json::Value>>,
        request: Option<RawRequest>,
        response: RawResponse,
    },

    /// The request was sent but nothing came back.
    #[error("server time out")]
    Timeout { request: RawRequest },

    /// The request could not be set up.
    #[error("{message}")]
    Setup { message: String },

    /// A successful response did not match the expected prediction shape.
    #[error("Failed to decode response: {message}")]
    Decode {
        message: String,
        body: Option<serde_json::Value>,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::validation_with_context(msg, ErrorContext::new())
    }

    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Human-readable message without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            Error::Configuration { message, .. }
            | Error::Validation { message, .. }
            | Error::Api { message, .. }
            | Error::Setup { message }
            | Error::Decode { message, .. } => message.clone(),
            Error::Timeout { .. } => TIMEOUT_MESSAGE.to_string(),
            Error::Serialization(e) => e.to_string(),
            Error::Io(e) => e.to_string(),
        }
    }

    /// HTTP-like status for errors that came from a request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Timeout { .. } => Some(TIMEOUT_STATUS),
            _ => None,
        }
    }

    /// Structured details returned by the API, if any.
    pub fn details(&self) -> Option<&[serde_json::Value]> {
        match self {
            Error::Api { details, .. } => details.as_deref(),
            _ => None,
        }
    }

    pub fn raw_request(&self) -> Option<&RawRequest> {
        match self {
            Error::Timeout { request } => Some(request),
            Error::Api { request, .. } => request.as_ref(),
            _ => None,
        }
    }

    pub fn raw_response(&self) -> Option<&RawResponse> {
        match self {
            Error::Api { response, .. } => Some(response),
            _ => None,
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Validation { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }
}
