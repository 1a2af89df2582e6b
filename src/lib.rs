//! # epigos
//!
//! Rust client SDK for the Epigos prediction API: image classification and
//! object detection against models hosted on the Epigos platform.
//!
//! ## Overview
//!
//! The SDK is deliberately thin. An [`EpigosClient`] holds the API key and base
//! URL and performs authenticated calls through a pluggable [`Transport`].
//! Model handles ([`ClassificationModel`], [`ObjectDetectionModel`]) validate
//! payloads locally, shape the request body, and decode the typed prediction.
//! Every failed call is normalized into a single [`Error`] type.
//!
//! There is no retry, batching, caching or rate limiting: each prediction is
//! exactly one HTTP request.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use epigos::{ClassificationPayload, ClientConfig, EpigosClient};
//!
//! #[tokio::main]
//! async fn main() -> epigos::Result<()> {
//!     let client = EpigosClient::new(ClientConfig::new("your-api-key"))?;
//!     let model = client.classification("your-model-id")?;
//!
//!     let prediction = model
//!         .predict(&ClassificationPayload::from_url("https://example.com/dog.jpg"))
//!         .await?;
//!     println!("{} ({:.2})", prediction.category, prediction.confidence);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Authenticated client, builder and error normalization |
//! | [`models`] | Classification and object detection models, payloads, predictions |
//! | [`transport`] | Transport trait and the default reqwest implementation |
//! | [`error`] | Unified error type |

pub mod client;
pub mod models;
pub mod transport;

// Re-export main types for convenience
pub use client::{ApiRequest, ClientConfig, EpigosClient, EpigosClientBuilder, DEFAULT_BASE_URL};
pub use models::{
    ClassificationModel, ClassificationPayload, ClassificationPrediction, Classifier, Detection,
    DetectionOptions, Detector, ObjectDetectionModel, ObjectDetectionPayload,
    ObjectDetectionPrediction, PredictedClass,
};
pub use transport::{
    HttpMethod, HttpTransport, RawRequest, RawResponse, Transport, TransportError,
    TransportRequest,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
