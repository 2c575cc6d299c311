use std::sync::Arc;
use std::time::Duration;

use crate::audio::{EmotionClassifier, Transcriber};
use crate::constants::{DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_SCORING_TIMEOUT_MS};
use crate::scoring::{SelectionScorer, SimilarityScorer};

#[derive(Clone)]
pub struct HandlerState {
    pub scorer: Arc<SimilarityScorer>,

    pub selection: SelectionScorer,

    pub transcriber: Arc<dyn Transcriber>,

    pub classifier: Arc<dyn EmotionClassifier>,

    pub scoring_timeout: Duration,

    pub max_upload_bytes: usize,
}

impl HandlerState {
    pub fn new(
        scorer: Arc<SimilarityScorer>,
        selection: SelectionScorer,
        transcriber: Arc<dyn Transcriber>,
        classifier: Arc<dyn EmotionClassifier>,
    ) -> Self {
        Self {
            scorer,
            selection,
            transcriber,
            classifier,
            scoring_timeout: Duration::from_millis(DEFAULT_SCORING_TIMEOUT_MS),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_scoring_timeout(mut self, timeout: Duration) -> Self {
        self.scoring_timeout = timeout;
        self
    }

    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }
}
