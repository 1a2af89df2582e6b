//! Error normalization over the real HTTP transport.

use crate::integration::mock_server::{MockServerFixture, API_KEY, MODEL_ID};
use epigos::error::{SETUP_FAILURE_MESSAGE, TIMEOUT_MESSAGE};
use epigos::{
    ApiRequest, ClassificationPayload, EpigosClient, Error, HttpMethod, HttpTransport,
    ObjectDetectionPayload, Transport, TransportRequest,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Duration;

#[tokio::test]
async fn test_client_error_carries_message_status_and_details() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_raw(
            "/predict/classify/model-id/",
            400,
            r#"{"message":"validation error","details":[{"field":"image","msg":"invalid"}]}"#,
        )
        .await;

    let model = fixture.client().classification(MODEL_ID).unwrap();
    let err = model
        .predict(&ClassificationPayload::from_base64("b64"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api { .. }));
    assert_eq!(err.message(), "validation error");
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.details().unwrap()[0]["field"], "image");
    assert_eq!(err.raw_response().unwrap().status, 400);
    assert!(err.raw_request().unwrap().url.ends_with("/predict/classify/model-id/"));
}

#[tokio::test]
async fn test_non_json_error_body_uses_status_line() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_raw("/predict/detect/model-id/", 502, "<html>Bad Gateway</html>")
        .await;

    let model = fixture.client().object_detection(MODEL_ID).unwrap();
    let err = model
        .detect(&ObjectDetectionPayload::from_base64("b64"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(502));
    assert_eq!(err.message(), "HTTP 502 Bad Gateway");
    assert_eq!(
        err.raw_response().unwrap().data,
        json!("<html>Bad Gateway</html>")
    );
}

#[tokio::test]
async fn test_unreachable_server_is_timeout() {
    // Nothing listens on port 1; the request is attempted but never answered.
    let client = EpigosClient::builder()
        .api_key(API_KEY)
        .base_url("http://127.0.0.1:1")
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let err = client
        .call_api(ApiRequest::post("/predict/classify/model-id/", json!({"image": "b64"})))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout { .. }));
    assert_eq!(err.message(), TIMEOUT_MESSAGE);
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_invalid_header_is_setup_failure() {
    let transport = HttpTransport::new().unwrap();
    let err = transport
        .send(TransportRequest {
            method: HttpMethod::Post,
            url: "/predict/classify/model-id/".into(),
            base_url: "http://127.0.0.1:1".into(),
            headers: BTreeMap::from([("bad header".to_string(), "x".to_string())]),
            data: None,
        })
        .await
        .unwrap_err();

    assert!(err.request.is_none());
    assert!(err.response.is_none());
    assert_eq!(epigos::client::normalize(err).message(), SETUP_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_success_with_invalid_json_is_reported_with_response() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_raw("/predict/classify/model-id/", 200, "not json")
        .await;

    let err = fixture
        .client()
        .call_api(ApiRequest::post("/predict/classify/model-id/", json!({"image": "b64"})))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(200));
    assert!(err.message().starts_with("Invalid JSON in response body"));
}

#[tokio::test]
async fn test_call_api_returns_raw_body() {
    let mut fixture = MockServerFixture::new().await;
    let body = json!({"data": {"anything": [1, 2, 3]}, "meta": null});
    let _mock = fixture
        .mock_raw("/custom/endpoint/", 200, &body.to_string())
        .await;

    let got = fixture
        .client()
        .call_api(ApiRequest::post("/custom/endpoint/", json!({})))
        .await
        .unwrap();
    assert_eq!(got, body);
}
