//! API integration tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use facelens_api::{create_router, ApiConfig, AppState};
use facelens_client::{DetectionClient, DetectionClientConfig};
use facelens_media::{encode_png, DynamicImage};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BOUNDARY: &str = "facelens-test-boundary";

const TWO_FACES: &str = r#"{
    "request_id": "req-2",
    "faces": [
        {
            "face_rectangle": {"left": 10, "top": 30, "width": 40, "height": 40},
            "attributes": {
                "age": {"value": 30},
                "gender": {"value": "Male"},
                "smile": {"value": 87.5},
                "emotion": {"happiness": 88.0, "sadness": 2.0},
                "headpose": {"pitch_angle": 1.0, "roll_angle": 2.0, "yaw_angle": 3.0}
            }
        },
        {
            "face_rectangle": {"left": 60, "top": 30, "width": 30, "height": 30},
            "attributes": {
                "age": {"value": 52},
                "gender": {"value": "Female"},
                "smile": {"value": 4.0},
                "emotion": {"neutral": 90.0},
                "headpose": {"pitch_angle": 0.0, "roll_angle": 0.0, "yaw_angle": 0.0}
            }
        }
    ]
}"#;

fn router_for(server: &MockServer) -> Router {
    router_with_endpoint(format!("{}/facepp/v3/detect", server.uri()))
}

fn router_with_endpoint(endpoint: String) -> Router {
    let client = DetectionClient::new(
        DetectionClientConfig::new("test-key", "test-secret").with_endpoint(endpoint),
    )
    .unwrap();
    let config = ApiConfig {
        max_image_width: 128,
        max_image_height: 128,
        ..ApiConfig::default()
    };
    create_router(AppState::new(config, client), None)
}

fn png(width: u32, height: u32) -> Vec<u8> {
    encode_png(&DynamicImage::new_rgb8(width, height)).unwrap()
}

fn multipart_request(image: Option<&[u8]>, language: Option<&str>) -> Request<Body> {
    multipart_request_to("/api/analyze", image, language)
}

fn multipart_request_to(uri: &str, image: Option<&[u8]>, language: Option<&str>) -> Request<Body> {
    let mut body = Vec::new();
    if let Some(language) = language {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"language\"\r\n\r\n{language}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(image) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"photo.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(image);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn mount(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/facepp/v3/detect"))
        .respond_with(template)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = MockServer::start().await;
    let response = router_for(&server)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(json_body(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_labels_in_french() {
    let server = MockServer::start().await;
    let response = router_for(&server)
        .oneshot(
            Request::builder()
                .uri("/api/labels?language=fr")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["language"], "french");
    assert_eq!(body["labels"]["smile"], "Sourire");
    assert_eq!(body["languages"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_labels_unknown_language() {
    let server = MockServer::start().await;
    let response = router_for(&server)
        .oneshot(
            Request::builder()
                .uri("/api/labels?language=de")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_two_faces() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_string(TWO_FACES)).await;

    let response = router_for(&server)
        .oneshot(multipart_request(Some(&png(100, 80)), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["face_count"], 2);
    assert_eq!(body["faces_detected"], "Number of faces detected: 2");
    assert!(body["notices"].as_array().unwrap().is_empty());

    let faces = body["faces"].as_array().unwrap();
    assert_eq!(faces.len(), 2);
    assert_eq!(faces[0]["heading"], "Face 1:");
    assert_eq!(faces[0]["age"]["value"], "30");
    assert_eq!(faces[1]["heading"], "Face 2:");
    assert_eq!(faces[1]["gender"]["value"], "Female");

    let text = body["report_text"].as_str().unwrap();
    assert!(text.starts_with("Face 1:\n - Age: 30\n"));
    assert!(text.contains(" - Smile: 87.50% confidence"));
    assert!(!body["annotated_image"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_analyze_no_faces_in_french() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_string(r#"{"faces": []}"#),
    )
    .await;

    let response = router_for(&server)
        .oneshot(multipart_request(Some(&png(64, 64)), Some("fr")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "no_faces");
    assert_eq!(body["message"], "Aucun visage détecté.");
    assert!(body.get("annotated_image").is_none());
    assert!(body.get("faces").is_none());
}

#[tokio::test]
async fn test_analyze_service_error() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(403).set_body_string("AUTHENTICATION_ERROR"),
    )
    .await;

    let response = router_for(&server)
        .oneshot(multipart_request(Some(&png(64, 64)), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "API Error: 403 - AUTHENTICATION_ERROR");
    assert!(body.get("faces").is_none());
}

#[tokio::test]
async fn test_analyze_resizes_large_upload() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_string(r#"{"faces": []}"#),
    )
    .await;

    let response = router_for(&server)
        .oneshot(multipart_request(Some(&png(400, 200)), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body["notices"][0],
        "Image is too large. Automatically resized for processing."
    );
}

#[tokio::test]
async fn test_analyze_missing_image() {
    let server = MockServer::start().await;
    let response = router_for(&server)
        .oneshot(multipart_request(None, Some("en")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["detail"],
        "Bad request: Missing image field"
    );
}

#[tokio::test]
async fn test_analyze_rejects_unsupported_format() {
    let server = MockServer::start().await;
    let response = router_for(&server)
        .oneshot(multipart_request(Some(b"GIF89a not really"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_analyze_unreachable_service() {
    // Nothing listens on the discard port.
    let response = router_with_endpoint("http://127.0.0.1:9/facepp/v3/detect".to_string())
        .oneshot(multipart_request(Some(&png(64, 64)), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Could not detect faces. Please try again.");
    assert!(body.get("faces").is_none());
    assert!(body.get("annotated_image").is_none());
}

#[tokio::test]
async fn test_analyze_malformed_service_body() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_string(r#"{"error_message": "none"}"#),
    )
    .await;

    let response = router_for(&server)
        .oneshot(multipart_request(Some(&png(64, 64)), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("API Error: 200 - "));
    assert!(body.get("faces").is_none());
    assert!(body.get("annotated_image").is_none());
}

#[tokio::test]
async fn test_analyze_language_from_query() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_string(r#"{"faces": []}"#),
    )
    .await;

    let response = router_for(&server)
        .oneshot(multipart_request_to(
            "/api/analyze?language=fr",
            Some(&png(64, 64)),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["language"], "french");
    assert_eq!(body["message"], "Aucun visage détecté.");
}

#[tokio::test]
async fn test_analyze_form_language_overrides_query() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_string(r#"{"faces": []}"#),
    )
    .await;

    let response = router_for(&server)
        .oneshot(multipart_request_to(
            "/api/analyze?language=fr",
            Some(&png(64, 64)),
            Some("en"),
        ))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["message"], "No faces detected.");
}
