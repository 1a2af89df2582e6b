use super::types::{
    check_confidence, decode_prediction, resolve_image, DetectionOptions,
    ObjectDetectionPayload, ObjectDetectionPrediction,
};
use super::{predict_path, validate_model_id, Detector};
use crate::client::{ApiRequest, EpigosClient};
use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

const SOURCE: &str = "object_detection";

#[derive(Serialize)]
struct DetectBody<'a> {
    image: &'a str,
    #[serde(flatten)]
    options: &'a DetectionOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    confidence: Option<f64>,
}

/// Object detection model hosted by Epigos.
#[derive(Debug, Clone)]
pub struct ObjectDetectionModel {
    client: EpigosClient,
    model_id: String,
    path: String,
}

impl ObjectDetectionModel {
    pub fn new(client: EpigosClient, model_id: impl Into<String>) -> Result<Self> {
        let model_id = validate_model_id(model_id.into(), SOURCE)?;
        let path = predict_path("detect", &model_id)?;
        Ok(Self {
            client,
            model_id,
            path,
        })
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Detect objects in one image.
    ///
    /// When the payload carries options they replace [`DetectionOptions::DEFAULT`]
    /// entirely; fields are not merged.
    pub async fn detect(&self, payload: &ObjectDetectionPayload) -> Result<ObjectDetectionPrediction> {
        let image = resolve_image(
            payload.image_base64.as_deref(),
            payload.image_url.as_deref(),
            SOURCE,
        )?;
        let options = payload.options.unwrap_or(DetectionOptions::DEFAULT);
        let body = DetectBody {
            image,
            options: &options,
            confidence: check_confidence(payload.confidence, SOURCE)?,
        };
        let data = serde_json::to_value(&body)?;

        debug!(model_id = %self.model_id, annotate = options.annotate, "detecting objects");
        let resp = self
            .client
            .call_api(ApiRequest::post(self.path.as_str(), data))
            .await?;
        decode_prediction(resp)
    }
}

#[async_trait]
impl Detector for ObjectDetectionModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn detect(&self, payload: &ObjectDetectionPayload) -> Result<ObjectDetectionPrediction> {
        ObjectDetectionModel::detect(self, payload).await
    }
}
