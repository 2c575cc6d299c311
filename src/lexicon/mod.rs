//! Static word lexicons loaded from CSV at startup.
//!
//! - [`AnchorLexicon`] (`word,hypo,hyper,flow`) feeds semantic scoring.
//! - [`SelectionLexicon`] (`word,state,weight`) feeds discrete selection scoring.
//!
//! Words are lower-cased and trimmed on load. Duplicate rows are last-write-wins.

pub mod anchor;
pub mod error;
pub mod selection;


pub use anchor::{AnchorEntry, AnchorLexicon};
pub use error::LexiconError;
pub use selection::{SelectionEntry, SelectionLexicon};

use std::fs::File;
use std::io::Read;
use std::path::Path;

pub(crate) const COLUMN_WORD: &str = "word";

/// Opens `path` for reading, mapping a missing file to [`LexiconError::NotFound`].
pub(crate) fn open_source(path: &Path) -> Result<File, LexiconError> {
    File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LexiconError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LexiconError::Io(e),
    })
}

pub(crate) fn csv_reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(source)
}

/// Position of a header column, matched case-insensitively.
pub(crate) fn find_column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

pub(crate) fn require_column(
    headers: &csv::StringRecord,
    name: &'static str,
) -> Result<usize, LexiconError> {
    find_column(headers, name).ok_or(LexiconError::MissingColumn { column: name })
}

/// Lower-cased, trimmed word, or `None` if the cell is blank.
pub(crate) fn normalize_word(raw: &str) -> Option<String> {
    let word = raw.trim().to_lowercase();
    (!word.is_empty()).then_some(word)
}

/// Parses a weight cell. Absent columns and empty cells read as `0.0`.
pub(crate) fn parse_weight(
    record: &csv::StringRecord,
    column: Option<usize>,
    name: &'static str,
    row: usize,
) -> Result<f64, LexiconError> {
    let Some(raw) = column.and_then(|idx| record.get(idx)) else {
        return Ok(0.0);
    };
    if raw.is_empty() {
        return Ok(0.0);
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(LexiconError::InvalidWeight {
            row,
            column: name,
            value: raw.to_string(),
        }),
    }
}
