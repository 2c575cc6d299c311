use serde::{Deserialize, Serialize};

use crate::constants::{LABEL_NO_RELEVANT_KEYWORDS, LABEL_NO_VALID_TOKENS};
use crate::state::{RegulationState, StateScores};

/// A token that cleared the similarity threshold against one anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub token: String,
    pub matched_anchor: String,
    pub similarity: f32,
}

/// Outcome of scoring one sentence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// Percentages in `[0, 100]`, summing to ~100, or all zero when nothing matched.
    pub percentages: StateScores,
    /// Highest-percentage state, `None` when nothing matched.
    pub dominant: Option<RegulationState>,
    pub label: String,
    /// Matches in token-then-anchor order.
    pub matched: Vec<MatchRecord>,
}

impl ScoreResult {
    /// Result for input with no usable tokens.
    pub fn no_valid_tokens() -> Self {
        Self::empty(LABEL_NO_VALID_TOKENS, vec![])
    }

    /// Result for input whose matches carried zero total weight.
    pub fn no_relevant_keywords(matched: Vec<MatchRecord>) -> Self {
        Self::empty(LABEL_NO_RELEVANT_KEYWORDS, matched)
    }

    fn empty(label: &str, matched: Vec<MatchRecord>) -> Self {
        Self {
            percentages: StateScores::ZERO,
            dominant: None,
            label: label.to_string(),
            matched,
        }
    }

    /// Normalizes accumulated scores into a result.
    pub fn from_scores(scores: &StateScores, matched: Vec<MatchRecord>) -> Self {
        let Some(percentages) = scores.to_percentages() else {
            return Self::no_relevant_keywords(matched);
        };

        let dominant = percentages.dominant();
        // `{:?}` keeps the trailing `.0` on whole percentages.
        let label = format!(
            "Mixed: {:?}% hypo, {:?}% hyper, {:?}% flow (dominant: {})",
            percentages.hypo, percentages.hyper, percentages.flow, dominant
        );

        Self {
            percentages,
            dominant: Some(dominant),
            label,
            matched,
        }
    }

    /// Dominant state name, or `"none"`.
    pub fn dominant_name(&self) -> &'static str {
        self.dominant.map_or("none", |s| s.as_str())
    }
}
