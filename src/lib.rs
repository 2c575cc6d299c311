//! Attune library crate (used by the server binary and integration tests).
//!
//! Estimates a speaker's regulation state (hypo / hyper / flow) two ways:
//!
//! - **Selections**: user-picked words with intensities, looked up in a
//!   [`SelectionLexicon`] and scored by [`SelectionScorer`].
//! - **Free text**: a sentence (typed, or transcribed from audio) is tokenized and
//!   each content token is compared by embedding similarity against the anchor
//!   words of an [`AnchorLexicon`] by [`SimilarityScorer`].
//!
//! ## Modules
//! - [`lexicon`] - CSV lexicon loading
//! - [`embedding`] - [`EmbeddingProvider`] seam, local model, [`EmbeddingCache`]
//! - [`scoring`] - similarity and selection scoring
//! - [`audio`] - transcription and emotion collaborators
//! - [`gateway`] - HTTP surface
//! - [`config`] - `ATTUNE_*` environment configuration
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod audio;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod lexicon;
pub mod scoring;
pub mod state;

pub use audio::{
    ClassificationOutcome, CollaboratorError, DisabledClassifier, DisabledTranscriber,
    EmotionClassifier, HttpEmotionClassifier, HttpTranscriber, Transcriber, TranscriptionOutcome,
};
#[cfg(any(test, feature = "mock"))]
pub use audio::{MockClassifier, MockTranscriber};

pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_EMBEDDING_DIM, DEFAULT_SIMILARITY_THRESHOLD, DEMO_WORDS, EMOTION_ERROR_LABEL,
};
pub use embedding::{
    EmbeddingCache, EmbeddingError, EmbeddingProvider, EmbeddingVector, MiniLmConfig,
    MiniLmEmbedder,
};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbeddingProvider;
pub use gateway::{GatewayError, HandlerState, create_router_with_state};
pub use lexicon::{AnchorLexicon, LexiconError, SelectionEntry, SelectionLexicon};
pub use scoring::{
    MatchRecord, ScoreResult, ScoringError, Selection, SelectionScorer, SimilarityScorer,
    score_selections, score_sentence,
};
pub use state::{RegulationState, StateScores};
