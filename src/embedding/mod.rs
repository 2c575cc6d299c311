//! Embedding generation and memoization.
//!
//! - [`provider`] defines the [`EmbeddingProvider`] seam.
//! - [`minilm`] provides the local sentence-embedding model.
//! - [`cache`] memoizes vectors across scoring calls.

/// Embedding cache.
pub mod cache;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Local sentence embedder.
pub mod minilm;
/// Provider trait and shared vector type.
pub mod provider;
/// Tokenizer loading helpers.
pub mod utils;

/// Mock providers for tests.
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use cache::EmbeddingCache;
pub use error::EmbeddingError;
pub use minilm::{MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig, MiniLmEmbedder};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbeddingProvider;
pub use provider::{EmbeddingProvider, EmbeddingVector};
