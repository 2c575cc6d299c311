use std::sync::Arc;

use super::error::EmbeddingError;

/// Immutable embedding vector shared between the cache and its readers.
pub type EmbeddingVector = Arc<[f32]>;

/// Source of sentence embeddings.
///
/// Implementations must be order-preserving (one vector per input, same order) and
/// deterministic for a fixed model.
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds a batch of strings in one call.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Length of every vector this provider returns.
    fn embedding_dim(&self) -> usize;

    /// `true` for placeholder providers that produce no semantic signal.
    fn is_stub(&self) -> bool {
        false
    }
}

impl<P: EmbeddingProvider + ?Sized> EmbeddingProvider for Arc<P> {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).embed_batch(texts)
    }

    fn embedding_dim(&self) -> usize {
        (**self).embedding_dim()
    }

    fn is_stub(&self) -> bool {
        (**self).is_stub()
    }
}
