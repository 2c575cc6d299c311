use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum ScoringError {
    /// The embedding provider could not produce vectors; no result is possible.
    #[error("scoring unavailable: {0}")]
    EmbeddingUnavailable(#[from] EmbeddingError),

    #[error("invalid threshold {value}: must be between 0.0 and 1.0")]
    InvalidThreshold { value: f32 },
}

impl ScoringError {
    /// `true` when the failure comes from the embedding provider.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ScoringError::EmbeddingUnavailable(_))
    }
}
