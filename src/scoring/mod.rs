//! State scoring.
//!
//! - [`scorer`]: semantic scoring of free text against an [`AnchorLexicon`](crate::lexicon::AnchorLexicon)
//!   via embedding similarity.
//! - [`selection`]: direct lookup scoring of `{word, intensity}` selections.
//!
//! Both normalize accumulated per-state scores into percentages rounded to two
//! decimals; a zero total yields all-zero percentages.

pub mod error;
pub mod scorer;
pub mod selection;
pub mod similarity;
pub mod tokenize;
pub mod types;


pub use error::ScoringError;
pub use scorer::{SimilarityScorer, score_sentence};
pub use selection::{Selection, SelectionScorer, score_selections};
pub use similarity::cosine_similarity;
pub use tokenize::{ENGLISH_STOPWORDS, content_tokens};
pub use types::{MatchRecord, ScoreResult};
