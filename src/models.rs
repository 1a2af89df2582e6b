//! Prediction models: classification and object detection.
//!
//! A model is a remote endpoint identified by an opaque id. Each model type
//! validates its payload locally, shapes the request body, and delegates the
//! call to the shared [`crate::EpigosClient`].

mod classification;
mod detection;
pub mod types;

pub use classification::ClassificationModel;
pub use detection::ObjectDetectionModel;
pub use types::{
    ClassificationPayload, ClassificationPrediction, Detection, DetectionOptions,
    ObjectDetectionPayload, ObjectDetectionPrediction, PredictedClass,
};

use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use url::Url;

/// Anything that can classify an image.
#[async_trait]
pub trait Classifier: Send + Sync {
    fn model_id(&self) -> &str;

    async fn predict(&self, payload: &ClassificationPayload) -> Result<ClassificationPrediction>;
}

/// Anything that can detect objects in an image.
#[async_trait]
pub trait Detector: Send + Sync {
    fn model_id(&self) -> &str;

    async fn detect(&self, payload: &ObjectDetectionPayload) -> Result<ObjectDetectionPrediction>;
}

fn validate_model_id(model_id: String, source: &str) -> Result<String> {
    let model_id = model_id.trim();
    if model_id.is_empty() {
        return Err(Error::configuration_with_context(
            "modelId is required",
            ErrorContext::new()
                .with_field_path("model_id")
                .with_source(source),
        ));
    }
    if matches!(model_id, "." | "..") {
        return Err(Error::configuration_with_context(
            "modelId must not be a relative path segment",
            ErrorContext::new()
                .with_field_path("model_id")
                .with_details(model_id)
                .with_source(source),
        ));
    }
    Ok(model_id.to_string())
}

/// `/predict/{task}/{model_id}/` with the model id percent-encoded as a single
/// path segment.
fn predict_path(task: &str, model_id: &str) -> Result<String> {
    let mut url = Url::parse("http://localhost/")
        .map_err(|e| Error::configuration(format!("cannot build prediction path: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| Error::configuration("cannot build prediction path"))?
        .extend(["predict", task, model_id, ""]);
    Ok(url.path().to_string())
}
