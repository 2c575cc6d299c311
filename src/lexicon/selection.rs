//! Single-state lexicon for discrete word selections.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use super::error::LexiconError;
use super::{COLUMN_WORD, csv_reader, find_column, normalize_word, open_source, parse_weight, require_column};
use crate::state::RegulationState;

const COLUMN_STATE: &str = "state";
const COLUMN_WEIGHT: &str = "weight";

/// The single state a word counts towards, and how strongly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionEntry {
    pub state: RegulationState,
    pub weight: f64,
}

/// Word → `{state, weight}`.
#[derive(Debug, Clone, Default)]
pub struct SelectionLexicon {
    entries: HashMap<String, SelectionEntry>,
}

impl SelectionLexicon {
    /// Reads a `word,state,weight` CSV. `word` and `state` are required.
    pub fn load<R: Read>(source: R) -> Result<Self, LexiconError> {
        let mut reader = csv_reader(source);
        let headers = reader.headers()?.clone();

        let word_col = require_column(&headers, COLUMN_WORD)?;
        let state_col = require_column(&headers, COLUMN_STATE)?;
        let weight_col = find_column(&headers, COLUMN_WEIGHT);

        let mut entries = HashMap::new();

        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let row = record.position().map_or(idx + 2, |p| p.line() as usize);

            let Some(word) = record.get(word_col).and_then(normalize_word) else {
                warn!(row, "Skipping lexicon row with empty word");
                continue;
            };

            let raw_state = record.get(state_col).unwrap_or_default();
            let state =
                RegulationState::parse(raw_state).ok_or_else(|| LexiconError::UnknownState {
                    row,
                    value: raw_state.to_string(),
                })?;

            let weight = parse_weight(&record, weight_col, COLUMN_WEIGHT, row)?;

            entries.insert(word, SelectionEntry { state, weight });
        }

        Ok(Self { entries })
    }

    /// Reads a selection lexicon from a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let lexicon = Self::load(open_source(path)?)?;

        info!(
            path = %path.display(),
            words = lexicon.len(),
            "Selection lexicon loaded"
        );

        Ok(lexicon)
    }

    pub fn from_entries<I, W>(entries: I) -> Self
    where
        I: IntoIterator<Item = (W, SelectionEntry)>,
        W: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .filter_map(|(word, entry)| normalize_word(word.as_ref()).map(|w| (w, entry)))
            .collect();
        Self { entries }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, word: &str) -> Option<&SelectionEntry> {
        match normalize_word(word) {
            Some(word) => self.entries.get(&word),
            None => None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
