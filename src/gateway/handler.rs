use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Multipart, State, multipart::MultipartRejection, rejection::JsonRejection,
    },
    http::StatusCode,
};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::audio::{ClassificationOutcome, TranscriptionOutcome};
use crate::constants::DEMO_WORDS;
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{AudioAnalysisResponse, ScoreRequest, ScoreResponse};
use crate::gateway::state::HandlerState;
use crate::scoring::{ScoreResult, Selection};
use crate::state::StateScores;

pub(crate) const AUDIO_FIELD: &str = "audio";
pub(crate) const FILE_FIELD: &str = "file";
pub(crate) const NO_AUDIO_UPLOADED: &str = "No audio file uploaded";
pub(crate) const NO_FILE_UPLOADED: &str = "No file uploaded";

#[instrument]
pub async fn words_handler() -> Json<[&'static str; 9]> {
    Json(DEMO_WORDS)
}

#[instrument(skip(state, payload))]
pub async fn predict_handler(
    State(state): State<HandlerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<StateScores>, GatewayError> {
    let Json(value) = payload.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    let selections: Vec<Selection> = serde_json::from_value(value)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid selections: {}", e)))?;

    debug!(selections = selections.len(), "Scoring selections");
    Ok(Json(state.selection.score(&selections)))
}

#[instrument(skip(state, payload))]
pub async fn score_handler(
    State(state): State<HandlerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ScoreResponse>, GatewayError> {
    let Json(value) = payload.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    let request: ScoreRequest = serde_json::from_value(value)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;

    let result = run_scoring(&state, request.text, request.threshold).await?;
    Ok(Json(result.into()))
}

#[instrument(skip(state, multipart))]
pub async fn analyze_audio_handler(
    State(state): State<HandlerState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AudioAnalysisResponse>, GatewayError> {
    analyze_upload(&state, multipart, AUDIO_FIELD, NO_AUDIO_UPLOADED).await
}

#[instrument(skip(state, multipart))]
pub async fn upload_audio_handler(
    State(state): State<HandlerState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AudioAnalysisResponse>, GatewayError> {
    analyze_upload(&state, multipart, FILE_FIELD, NO_FILE_UPLOADED).await
}

/// Transcribe, classify and score one upload.
///
/// Collaborator failures are swallowed into their fallback values; only scoring
/// failures fail the request.
async fn analyze_upload(
    state: &HandlerState,
    multipart: Result<Multipart, MultipartRejection>,
    field: &str,
    missing: &'static str,
) -> Result<Json<AudioAnalysisResponse>, GatewayError> {
    let multipart = multipart.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    let audio = read_upload(multipart, field)
        .await?
        .ok_or(GatewayError::MissingUpload(missing))?;

    debug!(bytes = audio.len(), field, "Audio received");

    let (transcription, emotion) = tokio::join!(
        state.transcriber.transcribe(&audio),
        state.classifier.classify(&audio)
    );

    if let TranscriptionOutcome::Unavailable { reason } = &transcription {
        warn!(%reason, "Transcription unavailable, scoring empty text");
    }
    if let ClassificationOutcome::Unavailable { reason } = &emotion {
        warn!(%reason, "Emotion classification unavailable");
    }

    let transcription = transcription.into_text();
    let emotion = emotion.into_label();

    let result = run_scoring(state, transcription.clone(), None).await?;
    Ok(Json(AudioAnalysisResponse::new(transcription, emotion, result)))
}

/// Returns the bytes of the first field named `field`, or `None` if absent.
async fn read_upload(mut multipart: Multipart, field: &str) -> Result<Option<Vec<u8>>, GatewayError> {
    loop {
        let next = multipart.next_field().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                GatewayError::PayloadTooLarge
            } else {
                GatewayError::InvalidRequest(format!("Malformed multipart body: {}", e))
            }
        })?;

        let Some(part) = next else {
            return Ok(None);
        };

        if part.name() != Some(field) {
            continue;
        }

        let bytes = part.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                GatewayError::PayloadTooLarge
            } else {
                GatewayError::InvalidRequest(format!("Failed to read upload: {}", e))
            }
        })?;
        return Ok(Some(bytes.to_vec()));
    }
}

/// Scores `text` on the blocking pool, bounded by the configured timeout.
pub(crate) async fn run_scoring(
    state: &HandlerState,
    text: String,
    threshold: Option<f32>,
) -> Result<ScoreResult, GatewayError> {
    let scorer = Arc::clone(&state.scorer);
    let task = tokio::task::spawn_blocking(move || match threshold {
        Some(threshold) => scorer.score_with_threshold(&text, threshold),
        None => scorer.score(&text),
    });

    match tokio::time::timeout(state.scoring_timeout, task).await {
        Ok(Ok(result)) => Ok(result?),
        Ok(Err(e)) => Err(GatewayError::InternalError(format!(
            "Scoring task failed: {}",
            e
        ))),
        Err(_) => {
            warn!(
                timeout_ms = state.scoring_timeout.as_millis() as u64,
                "Scoring timed out"
            );
            Err(GatewayError::ScoringTimeout {
                timeout_ms: state.scoring_timeout.as_millis(),
            })
        }
    }
}
