//! Lexicon loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Malformed or unreadable lexicon data. Fatal at startup: no partial lexicon is kept.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// The lexicon file does not exist.
    #[error("lexicon file not found: {path}")]
    NotFound { path: PathBuf },

    /// A required column is absent from the header row.
    #[error("lexicon is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    /// A weight cell is not a finite, non-negative number.
    #[error("row {row}: invalid {column} value '{value}'")]
    InvalidWeight {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// A `state` cell names something other than hypo / hyper / flow.
    #[error("row {row}: unknown state '{value}' (expected hypo, hyper or flow)")]
    UnknownState { row: usize, value: String },

    #[error("failed to parse lexicon: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read lexicon: {0}")]
    Io(#[from] std::io::Error),
}
