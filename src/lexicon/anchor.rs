//! Anchor lexicon for semantic scoring.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use super::error::LexiconError;
use super::{COLUMN_WORD, csv_reader, find_column, normalize_word, open_source, parse_weight, require_column};
use crate::state::{RegulationState, StateScores};

/// A lexicon word with its per-state contribution weights.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorEntry {
    pub word: String,
    pub weights: StateScores,
}

/// Word → `{hypo, hyper, flow}` weights.
///
/// Anchors keep the order in which each word first appeared in the source.
#[derive(Debug, Clone, Default)]
pub struct AnchorLexicon {
    anchors: Vec<String>,
    weights: Vec<StateScores>,
    index: HashMap<String, usize>,
}

impl AnchorLexicon {
    /// Reads a `word,hypo,hyper,flow` CSV.
    ///
    /// Only `word` is required; absent weight columns and empty cells read as `0.0`.
    pub fn load<R: Read>(source: R) -> Result<Self, LexiconError> {
        let mut reader = csv_reader(source);
        let headers = reader.headers()?.clone();

        let word_col = require_column(&headers, COLUMN_WORD)?;
        let state_cols: Vec<(RegulationState, Option<usize>)> = RegulationState::ALL
            .iter()
            .map(|state| (*state, find_column(&headers, state.as_str())))
            .collect();

        for (state, col) in &state_cols {
            if col.is_none() {
                debug!(column = state.as_str(), "Weight column absent, defaulting to 0.0");
            }
        }

        let mut lexicon = Self::default();

        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let row = record.position().map_or(idx + 2, |p| p.line() as usize);

            let Some(word) = record.get(word_col).and_then(normalize_word) else {
                warn!(row, "Skipping lexicon row with empty word");
                continue;
            };

            let mut weights = StateScores::ZERO;
            for (state, col) in &state_cols {
                *weights.get_mut(*state) = parse_weight(&record, *col, state.as_str(), row)?;
            }

            lexicon.insert(word, weights);
        }

        Ok(lexicon)
    }

    /// Reads an anchor lexicon from a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let lexicon = Self::load(open_source(path)?)?;

        info!(
            path = %path.display(),
            anchors = lexicon.len(),
            "Anchor lexicon loaded"
        );

        Ok(lexicon)
    }

    /// Builds a lexicon from in-memory entries (same normalization as [`load`](Self::load)).
    pub fn from_entries<I, W>(entries: I) -> Self
    where
        I: IntoIterator<Item = (W, StateScores)>,
        W: AsRef<str>,
    {
        let mut lexicon = Self::default();
        for (word, weights) in entries {
            if let Some(word) = normalize_word(word.as_ref()) {
                lexicon.insert(word, weights);
            }
        }
        lexicon
    }

    fn insert(&mut self, word: String, weights: StateScores) {
        match self.index.get(&word) {
            Some(&pos) => self.weights[pos] = weights,
            None => {
                self.index.insert(word.clone(), self.anchors.len());
                self.anchors.push(word);
                self.weights.push(weights);
            }
        }
    }

    /// Distinct anchor words in first-occurrence order.
    #[inline]
    pub fn anchors(&self) -> &[String] {
        &self.anchors
    }

    /// Weights for `word` (exact match against the normalized word).
    pub fn weights(&self, word: &str) -> Option<StateScores> {
        self.index.get(word).map(|&pos| self.weights[pos])
    }

    /// Weights by anchor position, aligned with [`anchors`](Self::anchors).
    #[inline]
    pub(crate) fn weights_at(&self, pos: usize) -> &StateScores {
        &self.weights[pos]
    }

    pub fn entries(&self) -> impl Iterator<Item = AnchorEntry> + '_ {
        self.anchors
            .iter()
            .zip(&self.weights)
            .map(|(word, weights)| AnchorEntry {
                word: word.clone(),
                weights: *weights,
            })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}
