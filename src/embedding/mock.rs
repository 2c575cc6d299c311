//! Deterministic in-memory embedding provider for tests.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;

use super::error::EmbeddingError;
use super::provider::EmbeddingProvider;

/// Default mock dimension. Large enough that unrelated hashed vectors stay near-orthogonal.
pub const MOCK_EMBEDDING_DIM: usize = 384;

/// Test provider with pinned vectors, hashed fallbacks, a call log and failure injection.
#[derive(Debug)]
pub struct MockEmbeddingProvider {
    dim: usize,
    pinned: HashMap<String, Vec<f32>>,
    fail_with: Option<String>,
    fail_after: Option<usize>,
    delay: Option<Duration>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl Default for MockEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEmbeddingProvider {
    pub fn new() -> Self {
        Self::with_dim(MOCK_EMBEDDING_DIM)
    }

    pub fn with_dim(dim: usize) -> Self {
        Self {
            dim,
            pinned: HashMap::new(),
            fail_with: None,
            fail_after: None,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Pins `text` to `prefix`, zero-padded to the provider dimension.
    pub fn with_vector(mut self, text: &str, prefix: &[f32]) -> Self {
        let mut vector = vec![0.0; self.dim];
        for (slot, value) in vector.iter_mut().zip(prefix) {
            *slot = *value;
        }
        self.pinned.insert(text.to_string(), vector);
        self
    }

    /// Every call fails with [`EmbeddingError::Unavailable`].
    pub fn failing(mut self, reason: &str) -> Self {
        self.fail_with = Some(reason.to_string());
        self
    }

    /// Answers the first `calls` calls, then fails every later one.
    pub fn fail_after(mut self, calls: usize) -> Self {
        self.fail_after = Some(calls);
        self
    }

    /// Blocks each call for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `embed_batch` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Inputs of every `embed_batch` call so far.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        if let Some(vector) = self.pinned.get(text) {
            return vector.clone();
        }

        use std::hash::{DefaultHasher, Hash, Hasher};
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let mut state = hasher.finish();

        (0..self.dim)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                ((state >> 33) as f32 / (u32::MAX >> 1) as f32) * 2.0 - 1.0
            })
            .collect()
    }
}

impl EmbeddingProvider for MockEmbeddingProvider {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let call_index = {
            let mut calls = self.calls.lock();
            calls.push(texts.iter().map(|t| t.to_string()).collect());
            calls.len() - 1
        };

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        if let Some(reason) = &self.fail_with {
            return Err(EmbeddingError::Unavailable {
                reason: reason.clone(),
            });
        }

        if self.fail_after.is_some_and(|limit| call_index >= limit) {
            return Err(EmbeddingError::Unavailable {
                reason: format!("mock provider exhausted after {call_index} calls"),
            });
        }

        Ok(texts.iter().map(|text| self.vector_for(text)).collect())
    }

    fn embedding_dim(&self) -> usize {
        self.dim
    }

    fn is_stub(&self) -> bool {
        true
    }
}

/// Provider that returns the wrong number of vectors, for exercising cache validation.
#[derive(Debug, Default)]
pub struct ShortBatchProvider;

impl EmbeddingProvider for ShortBatchProvider {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().skip(1).map(|_| vec![1.0; 4]).collect())
    }

    fn embedding_dim(&self) -> usize {
        4
    }
}
