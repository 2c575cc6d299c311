//! Process-lifetime text → embedding memo.
//!
//! The cache is unbounded: anchor vocabulary is small and fixed, and token vocabulary
//! is bounded by real-world usage. Entries are inserted whole, so concurrent readers
//! either miss or see a complete vector.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use moka::sync::Cache;
use tracing::debug;

use super::error::EmbeddingError;
use super::provider::{EmbeddingProvider, EmbeddingVector};

/// Memoizing front for an [`EmbeddingProvider`], keyed by exact input string.
pub struct EmbeddingCache {
    provider: Arc<dyn EmbeddingProvider>,
    entries: Cache<String, EmbeddingVector>,
}

impl std::fmt::Debug for EmbeddingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingCache")
            .field("embedding_dim", &self.provider.embedding_dim())
            .field("provider_stub", &self.provider.is_stub())
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

impl EmbeddingCache {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider,
            entries: Cache::builder().build(),
        }
    }

    /// Returns one vector per input, in input order.
    ///
    /// Uncached inputs are deduplicated and embedded with a single provider call.
    /// Repeated inputs resolve to the same shared vector.
    pub fn encode<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<EmbeddingVector>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let mut resolved: HashMap<&str, EmbeddingVector> = HashMap::with_capacity(texts.len());
        let mut pending: HashSet<&str> = HashSet::new();
        let mut missing: Vec<&str> = Vec::new();

        for text in texts {
            let text = text.as_ref();
            if resolved.contains_key(text) || pending.contains(text) {
                continue;
            }
            match self.entries.get(text) {
                Some(vector) => {
                    resolved.insert(text, vector);
                }
                None => {
                    pending.insert(text);
                    missing.push(text);
                }
            }
        }

        if !missing.is_empty() {
            debug!(
                requested = texts.len(),
                hits = resolved.len(),
                misses = missing.len(),
                "Embedding cache miss, calling provider"
            );
            self.fill(&missing, &mut resolved)?;
        }

        texts
            .iter()
            .map(|text| {
                resolved.get(text.as_ref()).cloned().ok_or_else(|| {
                    EmbeddingError::InferenceFailed {
                        reason: format!("no embedding resolved for '{}'", text.as_ref()),
                    }
                })
            })
            .collect()
    }

    fn fill<'a>(
        &self,
        missing: &[&'a str],
        resolved: &mut HashMap<&'a str, EmbeddingVector>,
    ) -> Result<(), EmbeddingError> {
        let vectors = self.provider.embed_batch(missing)?;

        if vectors.len() != missing.len() {
            return Err(EmbeddingError::BatchSizeMismatch {
                expected: missing.len(),
                actual: vectors.len(),
            });
        }

        let dim = self.provider.embedding_dim();
        if let Some(bad) = vectors.iter().find(|v| v.len() != dim) {
            return Err(EmbeddingError::DimensionMismatch {
                expected: dim,
                actual: bad.len(),
            });
        }

        for (text, vector) in missing.iter().zip(vectors) {
            let vector: EmbeddingVector = Arc::from(vector);
            self.entries.insert((*text).to_string(), Arc::clone(&vector));
            resolved.insert(*text, vector);
        }

        Ok(())
    }

    /// Returns `true` if `text` has a cached vector.
    pub fn contains(&self, text: &str) -> bool {
        self.entries.contains_key(text)
    }

    /// Number of cached vectors (may lag until [`run_pending_tasks`](Self::run_pending_tasks)).
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs pending maintenance in the underlying cache so `len` is exact.
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }

    pub fn provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.provider
    }

    pub fn embedding_dim(&self) -> usize {
        self.provider.embedding_dim()
    }
}
