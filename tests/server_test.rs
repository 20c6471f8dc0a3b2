use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use limbic::{server, EmotionAnalyzer, EMOTION_LABELS};

// Routes are exercised against an analyzer with no model bound; everything
// except a successful /analyze must behave identically either way.
fn test_router() -> axum::Router {
    server::router(Arc::new(EmotionAnalyzer::unloaded()))
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn analyze_request(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_health_succeeds_without_model() {
    let response = test_router()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model_loaded"], false);
    assert!(body["message"].as_str().unwrap().contains("running"));
}

#[tokio::test]
async fn test_emotions_lists_full_label_set() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/emotions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["count"], 28);

    let names: Vec<&str> = body["available_emotions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 28);
    for label in EMOTION_LABELS {
        assert!(names.contains(&label), "missing label {label}");
    }
}

#[tokio::test]
async fn test_analyze_empty_text_is_bad_request() {
    let response = test_router()
        .oneshot(analyze_request(json!({ "text": "" }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Text cannot be empty");
}

#[tokio::test]
async fn test_analyze_whitespace_text_is_bad_request() {
    let response = test_router()
        .oneshot(analyze_request(json!({ "text": " \t\n " }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_without_model_is_server_error() {
    let response = test_router()
        .oneshot(analyze_request(json!({ "text": "hello there" }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Model is not loaded");
}

#[tokio::test]
async fn test_analyze_rejects_malformed_body() {
    let response = test_router()
        .oneshot(analyze_request("{}".to_string()))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_cors_allows_dev_origin() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let allow_origin = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .expect("missing allow-origin header");
    assert_eq!(allow_origin, "http://localhost:5173");
}

#[tokio::test]
async fn test_cors_ignores_unknown_origin() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ORIGIN, "http://evil.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
