//! HTTP gateway (Axum) for selection, text and audio scoring.
//!
//! This module is primarily used by the `attune` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{
    analyze_audio_handler, predict_handler, score_handler, upload_audio_handler, words_handler,
};
pub use payload::{AudioAnalysisResponse, ScoreRequest, ScoreResponse};
pub use state::HandlerState;

pub const ATTUNE_STATUS_HEADER: &str = "X-Attune-Status";
pub const ATTUNE_STATUS_HEALTHY: &str = "healthy";
pub const ATTUNE_STATUS_READY: &str = "ready";
pub const ATTUNE_STATUS_NOT_READY: &str = "not_ready";

pub fn create_router_with_state(state: HandlerState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/words", get(words_handler))
        .route("/predict", post(predict_handler))
        .route("/score", post(score_handler))
        .route("/analyze_audio", post(analyze_audio_handler))
        .route("/upload_audio", post(upload_audio_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub anchor_lexicon: usize,
    pub selection_lexicon: usize,
    pub embedder_mode: &'static str,
    pub transcriber: &'static str,
    pub classifier: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        ATTUNE_STATUS_HEADER,
        HeaderValue::from_static(ATTUNE_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let embedder_mode = if state.scorer.cache().provider().is_stub() {
        "stub"
    } else {
        "real"
    };

    let components = ComponentStatus {
        http: ATTUNE_STATUS_READY,
        anchor_lexicon: state.scorer.lexicon().len(),
        selection_lexicon: state.selection.lexicon().len(),
        embedder_mode,
        transcriber: state.transcriber.kind(),
        classifier: state.classifier.kind(),
    };

    let is_ready = components.anchor_lexicon > 0 && components.selection_lexicon > 0;

    let (status_code, status_msg, header) = if is_ready {
        (StatusCode::OK, "ok", ATTUNE_STATUS_READY)
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "pending",
            ATTUNE_STATUS_NOT_READY,
        )
    };

    let mut headers = HeaderMap::new();
    headers.insert(ATTUNE_STATUS_HEADER, HeaderValue::from_static(header));

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
