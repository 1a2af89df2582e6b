//! Prediction payloads, options and results.

use crate::{Error, ErrorContext, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Input for [`crate::ClassificationModel::predict`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl ClassificationPayload {
    pub fn from_base64(image: impl Into<String>) -> Self {
        Self {
            image_base64: Some(image.into()),
            ..Self::default()
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            image_url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Base64-encode raw image bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_base64(STANDARD.encode(bytes))
    }

    /// Read and base64-encode an image file.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_base64(read_image_base64(path.as_ref()).await?))
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Input for [`crate::ObjectDetectionModel::detect`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDetectionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Replaces [`DetectionOptions::DEFAULT`] as a whole when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<DetectionOptions>,
}

impl ObjectDetectionPayload {
    pub fn from_base64(image: impl Into<String>) -> Self {
        Self {
            image_base64: Some(image.into()),
            ..Self::default()
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            image_url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_base64(STANDARD.encode(bytes))
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_base64(read_image_base64(path.as_ref()).await?))
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_options(mut self, options: DetectionOptions) -> Self {
        self.options = Some(options);
        self
    }
}

async fn read_image_base64(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(STANDARD.encode(bytes))
}

/// Rendering options for object detection.
///
/// `stroke_width` is tri-state on the wire: `None` omits the key,
/// `Some(None)` sends `null` (server picks a width), `Some(Some(px))` sends the
/// number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionOptions {
    pub annotate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_prob: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<Option<u32>>,
}

impl DetectionOptions {
    /// Sent when the payload carries no options: `{"annotate": false}`.
    pub const DEFAULT: Self = Self {
        annotate: false,
        show_prob: None,
        stroke_width: None,
    };

    /// Ask the server to return an annotated image.
    pub fn annotated() -> Self {
        Self {
            annotate: true,
            ..Self::DEFAULT
        }
    }

    pub fn with_show_prob(mut self, show_prob: bool) -> Self {
        self.show_prob = Some(show_prob);
        self
    }

    pub fn with_stroke_width(mut self, px: u32) -> Self {
        self.stroke_width = Some(Some(px));
        self
    }

    pub fn with_auto_stroke_width(mut self) -> Self {
        self.stroke_width = Some(None);
        self
    }
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedClass {
    pub category: String,
    pub confidence: f64,
}

/// Result of a classification call: top class plus the ranked list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationPrediction {
    pub category: String,
    pub confidence: f64,
    #[serde(default)]
    pub predictions: Vec<PredictedClass>,
}

/// One bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    pub confidence: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Result of a detection call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDetectionPrediction {
    pub detections: Vec<Detection>,
    /// Annotated image, base64 or a `data:` URI, when annotation was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ObjectDetectionPrediction {
    /// Decode the annotated image into raw bytes.
    pub fn decode_image(&self) -> Result<Option<Vec<u8>>> {
        let Some(image) = self.image.as_deref() else {
            return Ok(None);
        };
        let encoded = match image.strip_prefix("data:") {
            Some(uri) => uri.split_once(',').map(|(_, data)| data).unwrap_or(""),
            None => image,
        };
        STANDARD
            .decode(encoded.trim())
            .map(Some)
            .map_err(|e| Error::Decode {
                message: format!("annotated image is not valid base64: {}", e),
                body: None,
            })
    }
}

/// Pick the image to send: base64 when present, otherwise the URL. The picked
/// value must not be empty.
pub(crate) fn resolve_image<'a>(
    image_base64: Option<&'a str>,
    image_url: Option<&'a str>,
    source: &str,
) -> Result<&'a str> {
    image_base64
        .or(image_url)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            Error::validation_with_context(
                "imageBase64 or imageUrl is required",
                ErrorContext::new()
                    .with_field_path("payload.image_base64")
                    .with_source(source),
            )
        })
}

/// Reject confidences JSON cannot carry.
pub(crate) fn check_confidence(confidence: Option<f64>, source: &str) -> Result<Option<f64>> {
    match confidence {
        Some(c) if !c.is_finite() => Err(Error::validation_with_context(
            format!("confidence must be a finite number, got {}", c),
            ErrorContext::new()
                .with_field_path("payload.confidence")
                .with_source(source),
        )),
        other => Ok(other),
    }
}

/// Decode a successful response body into a typed prediction.
///
/// This is the trust boundary with the remote API. A body wrapped in a
/// `{"data": ...}` envelope is unwrapped when it does not match `T` directly.
/// Anything else becomes [`Error::Decode`] carrying the original body.
pub(crate) fn decode_prediction<T: serde::de::DeserializeOwned>(
    body: serde_json::Value,
) -> Result<T> {
    let err = match T::deserialize(&body) {
        Ok(prediction) => return Ok(prediction),
        Err(e) => e,
    };
    if let Some(inner) = body.get("data") {
        if let Ok(prediction) = T::deserialize(inner) {
            return Ok(prediction);
        }
    }
    Err(Error::Decode {
        message: err.to_string(),
        body: Some(body),
    })
}
