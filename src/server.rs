//! HTTP surface: three routes over the analyzer.
//!
//! The service layer is deliberately thin. Handlers validate nothing beyond
//! JSON shape; input rules live in the analyzer, and each error kind maps to
//! one status code here.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::warn;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::analyzer::{AnalysisResult, AnalyzeError, EmotionAnalyzer};
use crate::labels::{EMOTION_LABELS, NUM_EMOTIONS};

/// Local development origins allowed to call the API from a browser.
const ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://localhost:3000",
];

#[derive(Clone)]
struct AppState {
    analyzer: Arc<EmotionAnalyzer>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    text: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
    model_loaded: bool,
}

#[derive(Debug, Serialize)]
struct EmotionsResponse {
    available_emotions: [&'static str; NUM_EMOTIONS],
    count: usize,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    detail: String,
}

type ErrorReply = (StatusCode, Json<ErrorResponse>);

/// Builds the application router around a shared analyzer.
pub fn router(analyzer: Arc<EmotionAnalyzer>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/emotions", get(emotions))
        .route("/analyze", post(analyze))
        .layer(cors_layer())
        .with_state(AppState { analyzer })
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(
            ALLOWED_ORIGINS.iter().map(|o| HeaderValue::from_static(o)),
        ))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Health check. Always 200; readiness is reported, not enforced.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Emotion Analysis API is running",
        model_loaded: state.analyzer.is_ready(),
    })
}

/// Enumerates the label set. Independent of model readiness.
async fn emotions() -> Json<EmotionsResponse> {
    Json(EmotionsResponse {
        available_emotions: EMOTION_LABELS,
        count: NUM_EMOTIONS,
    })
}

async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, ErrorReply> {
    let analyzer = Arc::clone(&state.analyzer);

    // The forward pass is CPU-bound; keep it off the async workers.
    let result = tokio::task::spawn_blocking(move || analyzer.analyze(&request.text))
        .await
        .map_err(|e| {
            warn!("analysis task failed to complete: {e}");
            error_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                "analysis task failed to complete",
            )
        })?;

    result.map(Json).map_err(|e| {
        let status = match e {
            AnalyzeError::EmptyInput => StatusCode::BAD_REQUEST,
            AnalyzeError::NotReady | AnalyzeError::Inference(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        error_reply(status, &e.to_string())
    })
}

fn error_reply(status: StatusCode, detail: &str) -> ErrorReply {
    (
        status,
        Json(ErrorResponse {
            detail: detail.to_string(),
        }),
    )
}
