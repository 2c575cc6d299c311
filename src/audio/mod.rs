//! Audio collaborators: speech-to-text and emotion classification.
//!
//! Both are best-effort. Failures are carried as explicit `Unavailable` outcomes
//! and converted to their fallback values (`""` and `"Error"`) at the HTTP edge.

pub mod error;
pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use error::CollaboratorError;
pub use http::{HttpEmotionClassifier, HttpTranscriber};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockClassifier, MockTranscriber};

use async_trait::async_trait;

use crate::constants::EMOTION_ERROR_LABEL;

/// Result of a transcription attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptionOutcome {
    Text(String),
    Unavailable { reason: String },
}

impl TranscriptionOutcome {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Transcribed text, or the empty string when transcription failed.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Unavailable { .. } => String::new(),
        }
    }
}

/// Result of an emotion classification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationOutcome {
    Label(String),
    Unavailable { reason: String },
}

impl ClassificationOutcome {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Emotion label, or [`EMOTION_ERROR_LABEL`] when classification failed.
    pub fn into_label(self) -> String {
        match self {
            Self::Label(label) => label,
            Self::Unavailable { .. } => EMOTION_ERROR_LABEL.to_string(),
        }
    }
}

/// Speech-to-text provider.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &[u8]) -> TranscriptionOutcome;

    /// Short backend name for readiness reporting.
    fn kind(&self) -> &'static str;
}

/// Audio emotion classifier.
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    async fn classify(&self, audio: &[u8]) -> ClassificationOutcome;

    fn kind(&self) -> &'static str;
}

/// Transcriber used when no service is configured. Always unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTranscriber;

#[async_trait]
impl Transcriber for DisabledTranscriber {
    async fn transcribe(&self, _audio: &[u8]) -> TranscriptionOutcome {
        TranscriptionOutcome::unavailable("transcription service not configured")
    }

    fn kind(&self) -> &'static str {
        "disabled"
    }
}

/// Classifier used when no service is configured. Always unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledClassifier;

#[async_trait]
impl EmotionClassifier for DisabledClassifier {
    async fn classify(&self, _audio: &[u8]) -> ClassificationOutcome {
        ClassificationOutcome::unavailable("emotion classifier not configured")
    }

    fn kind(&self) -> &'static str {
        "disabled"
    }
}
