//! End-to-end prediction calls over the real HTTP transport.

use crate::integration::mock_server::{MockServerFixture, API_KEY, MODEL_ID};
use epigos::{
    ClassificationPayload, DetectionOptions, EpigosClient, HttpTransport, ObjectDetectionPayload,
};
use serde_json::json;
use std::sync::Arc;

const CLASSIFY_PATH: &str = "/predict/classify/model-id/";
const DETECT_PATH: &str = "/predict/detect/model-id/";

#[tokio::test]
async fn test_classify_with_image_url() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_post(
            CLASSIFY_PATH,
            json!({"image": "https://foo.bar/image.png"}),
            200,
            r#"{"category":"dog","confidence":0.91,"predictions":[{"category":"dog","confidence":0.91},{"category":"wolf","confidence":0.06}]}"#,
        )
        .await;

    let model = fixture.client().classification(MODEL_ID).unwrap();
    let prediction = model
        .predict(&ClassificationPayload::from_url("https://foo.bar/image.png"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(prediction.category, "dog");
    assert_eq!(prediction.predictions.len(), 2);
    assert_eq!(prediction.predictions[1].category, "wolf");
}

#[tokio::test]
async fn test_classify_with_confidence() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_post(
            CLASSIFY_PATH,
            json!({"image": "u", "confidence": 0.7}),
            200,
            r#"{"category":"cat","confidence":0.8,"predictions":[]}"#,
        )
        .await;

    let model = fixture.client().classification(MODEL_ID).unwrap();
    let prediction = model
        .predict(&ClassificationPayload::from_url("u").with_confidence(0.7))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(prediction.category, "cat");
}

#[tokio::test]
async fn test_detect_with_default_options() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_post(
            DETECT_PATH,
            json!({"image": "b64", "annotate": false}),
            200,
            r#"{"detections":[{"label":"car","confidence":0.77,"x":10,"y":20,"width":30,"height":40}]}"#,
        )
        .await;

    let model = fixture.client().object_detection(MODEL_ID).unwrap();
    let prediction = model
        .detect(&ObjectDetectionPayload::from_base64("b64"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(prediction.detections.len(), 1);
    assert_eq!(prediction.detections[0].height, 40.0);
    assert!(prediction.image.is_none());
}

#[tokio::test]
async fn test_detect_with_custom_options_returns_annotated_image() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_post(
            DETECT_PATH,
            json!({"image": "u", "annotate": true, "showProb": false, "strokeWidth": 5}),
            200,
            r#"{"image":"data:image/png;base64,aGVsbG8=","detections":[]}"#,
        )
        .await;

    let model = fixture.client().object_detection(MODEL_ID).unwrap();
    let options = DetectionOptions::annotated()
        .with_show_prob(false)
        .with_stroke_width(5);
    let prediction = model
        .detect(&ObjectDetectionPayload::from_url("u").with_options(options))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(prediction.decode_image().unwrap().unwrap(), b"hello");
}

#[tokio::test]
async fn test_concurrent_predictions_share_one_client() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", CLASSIFY_PATH)
        .with_status(200)
        .with_body(r#"{"category":"dog","confidence":0.9,"predictions":[]}"#)
        .expect(4)
        .create_async()
        .await;

    let model = fixture.client().classification(MODEL_ID).unwrap();
    let mut handles = Vec::new();
    for i in 0..4 {
        let model = model.clone();
        handles.push(tokio::spawn(async move {
            model
                .predict(&ClassificationPayload::from_base64(format!("img-{}", i)))
                .await
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().category, "dog");
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_injected_reqwest_client_is_used() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", DETECT_PATH)
        .match_header("x-api-key", API_KEY)
        .match_header("x-tenant", "acme")
        .with_status(200)
        .with_body(r#"{"detections":[]}"#)
        .expect(1)
        .create_async()
        .await;

    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert("x-tenant", reqwest::header::HeaderValue::from_static("acme"));
    let http = reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .unwrap();
    let client = EpigosClient::builder()
        .api_key(API_KEY)
        .base_url(&fixture.base_url)
        .transport(Arc::new(HttpTransport::from_client(http)))
        .build()
        .unwrap();

    let prediction = client
        .object_detection(MODEL_ID)
        .unwrap()
        .detect(&ObjectDetectionPayload::from_base64("b64"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(prediction.detections.is_empty());
}
