use serde::{Deserialize, Serialize};

use crate::scoring::{MatchRecord, ScoreResult};
use crate::state::StateScores;

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreRequest {
    pub text: String,
    #[serde(default)]
    pub threshold: Option<f32>,
}

/// [`ScoreResult`] with the dominant state rendered as a name (`"none"` when absent).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreResponse {
    pub percentages: StateScores,
    pub dominant: String,
    pub label: String,
    pub matched: Vec<MatchRecord>,
}

impl From<ScoreResult> for ScoreResponse {
    fn from(result: ScoreResult) -> Self {
        Self {
            dominant: result.dominant_name().to_string(),
            percentages: result.percentages,
            label: result.label,
            matched: result.matched,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudioAnalysisResponse {
    pub transcription: String,
    pub emotion: String,
    pub matched_words: Vec<MatchRecord>,
    pub state_percentages: StateScores,
    pub dominant_state: String,
}

impl AudioAnalysisResponse {
    pub fn new(transcription: String, emotion: String, result: ScoreResult) -> Self {
        Self {
            transcription,
            emotion,
            dominant_state: result.dominant_name().to_string(),
            state_percentages: result.percentages,
            matched_words: result.matched,
        }
    }
}
