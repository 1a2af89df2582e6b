use super::types::{
    check_confidence, decode_prediction, resolve_image, ClassificationPayload,
    ClassificationPrediction,
};
use super::{predict_path, validate_model_id, Classifier};
use crate::client::{ApiRequest, EpigosClient};
use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

const SOURCE: &str = "classification";

#[derive(Serialize)]
struct ClassifyBody<'a> {
    image: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    confidence: Option<f64>,
}

/// Image classification model hosted by Epigos.
#[derive(Debug, Clone)]
pub struct ClassificationModel {
    client: EpigosClient,
    model_id: String,
    path: String,
}

impl ClassificationModel {
    pub fn new(client: EpigosClient, model_id: impl Into<String>) -> Result<Self> {
        let model_id = validate_model_id(model_id.into(), SOURCE)?;
        let path = predict_path("classify", &model_id)?;
        Ok(Self {
            client,
            model_id,
            path,
        })
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Classify one image.
    pub async fn predict(&self, payload: &ClassificationPayload) -> Result<ClassificationPrediction> {
        let image = resolve_image(
            payload.image_base64.as_deref(),
            payload.image_url.as_deref(),
            SOURCE,
        )?;
        let body = ClassifyBody {
            image,
            confidence: check_confidence(payload.confidence, SOURCE)?,
        };
        let data = serde_json::to_value(&body)?;

        debug!(model_id = %self.model_id, "classifying image");
        let resp = self
            .client
            .call_api(ApiRequest::post(self.path.as_str(), data))
            .await?;
        decode_prediction(resp)
    }
}

#[async_trait]
impl Classifier for ClassificationModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn predict(&self, payload: &ClassificationPayload) -> Result<ClassificationPrediction> {
        ClassificationModel::predict(self, payload).await
    }
}
