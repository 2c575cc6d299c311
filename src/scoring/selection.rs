use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::lexicon::SelectionLexicon;
use crate::state::StateScores;

/// A word picked by the user and how strongly it applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub word: String,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub intensity: f64,
}

impl Selection {
    pub fn new(word: impl Into<String>, intensity: f64) -> Self {
        Self {
            word: word.into(),
            intensity,
        }
    }
}

/// Direct lexicon lookup: each known word adds `intensity * weight` to its state.
///
/// Unknown words and selections with a negative or non-finite intensity are
/// ignored. Returns percentages (all zero when nothing counted).
pub fn score_selections(selections: &[Selection], lexicon: &SelectionLexicon) -> StateScores {
    let mut scores = StateScores::ZERO;
    let mut known = 0usize;

    for selection in selections {
        if !is_valid_intensity(selection.intensity) {
            warn!(
                word = %selection.word,
                intensity = selection.intensity,
                "Skipping selection with invalid intensity"
            );
            continue;
        }
        if let Some(entry) = lexicon.get(&selection.word) {
            *scores.get_mut(entry.state) += selection.intensity * entry.weight;
            known += 1;
        }
    }

    debug!(
        selections = selections.len(),
        known,
        total = scores.total(),
        "Selections scored"
    );

    scores.to_percentages().unwrap_or(StateScores::ZERO)
}

/// [`score_selections`] bound to a shared lexicon.
#[derive(Debug, Clone)]
pub struct SelectionScorer {
    lexicon: Arc<SelectionLexicon>,
}

impl SelectionScorer {
    pub fn new(lexicon: Arc<SelectionLexicon>) -> Self {
        Self { lexicon }
    }

    pub fn score(&self, selections: &[Selection]) -> StateScores {
        score_selections(selections, &self.lexicon)
    }

    pub fn lexicon(&self) -> &SelectionLexicon {
        &self.lexicon
    }
}

fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Intensity {
        Number(f64),
        Text(String),
    }

    let value = match Intensity::deserialize(deserializer)? {
        Intensity::Number(value) => value,
        Intensity::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid intensity '{text}'")))?,
    };

    if !is_valid_intensity(value) {
        return Err(serde::de::Error::custom(format!(
            "intensity must be a finite, non-negative number, got {value}"
        )));
    }
    Ok(value)
}

#[inline]
fn is_valid_intensity(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
