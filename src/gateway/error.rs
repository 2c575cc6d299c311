use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::ATTUNE_STATUS_HEADER;
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Multipart body without the expected file field.
    #[error("{0}")]
    MissingUpload(&'static str),

    #[error("upload exceeds the size limit")]
    PayloadTooLarge,

    #[error("scoring failed: {0}")]
    ScoringFailed(#[from] ScoringError),

    #[error("scoring timed out after {timeout_ms} ms")]
    ScoringTimeout { timeout_ms: u128 },

    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, attune_status) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::MissingUpload(_) => (StatusCode::BAD_REQUEST, "missing_upload"),
            GatewayError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
            GatewayError::ScoringFailed(ScoringError::InvalidThreshold { .. }) => {
                (StatusCode::BAD_REQUEST, "invalid_request")
            }
            GatewayError::ScoringFailed(ScoringError::EmbeddingUnavailable(_))
            | GatewayError::ScoringTimeout { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "scoring_unavailable")
            }
            GatewayError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            ATTUNE_STATUS_HEADER,
            HeaderValue::from_str(attune_status).unwrap_or(HeaderValue::from_static("error")),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
