use std::sync::Arc;

use tracing::debug;

use crate::embedding::{EmbeddingCache, EmbeddingVector};
use crate::lexicon::AnchorLexicon;
use crate::state::StateScores;

use super::error::ScoringError;
use super::similarity::cosine_similarity;
use super::tokenize::content_tokens;
use super::types::{MatchRecord, ScoreResult};

/// Scores `sentence` against every anchor in `lexicon`.
///
/// Anchor vectors are fetched through `cache` on every call; prefer
/// [`SimilarityScorer`] when scoring repeatedly against the same lexicon.
pub fn score_sentence(
    sentence: &str,
    lexicon: &AnchorLexicon,
    cache: &EmbeddingCache,
    threshold: f32,
) -> Result<ScoreResult, ScoringError> {
    validate_threshold(threshold)?;

    let tokens = content_tokens(sentence);
    if tokens.is_empty() {
        debug!("No content tokens after filtering");
        return Ok(ScoreResult::no_valid_tokens());
    }

    let anchor_vectors = cache.encode(lexicon.anchors())?;
    let token_vectors = cache.encode(&tokens)?;

    Ok(accumulate(
        &tokens,
        &token_vectors,
        lexicon,
        &anchor_vectors,
        threshold,
    ))
}

/// Semantic scorer with anchor embeddings computed once up front.
pub struct SimilarityScorer {
    lexicon: Arc<AnchorLexicon>,
    cache: Arc<EmbeddingCache>,
    anchor_vectors: Vec<EmbeddingVector>,
    threshold: f32,
}

impl std::fmt::Debug for SimilarityScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityScorer")
            .field("anchors", &self.lexicon.len())
            .field("threshold", &self.threshold)
            .field("cache", &self.cache)
            .finish()
    }
}

impl SimilarityScorer {
    /// Embeds every anchor word through `cache`.
    pub fn new(
        lexicon: Arc<AnchorLexicon>,
        cache: Arc<EmbeddingCache>,
        threshold: f32,
    ) -> Result<Self, ScoringError> {
        validate_threshold(threshold)?;

        let anchor_vectors = cache.encode(lexicon.anchors())?;
        debug!(
            anchors = anchor_vectors.len(),
            threshold, "Anchor embeddings precomputed"
        );

        Ok(Self {
            lexicon,
            cache,
            anchor_vectors,
            threshold,
        })
    }

    /// Scores with the configured threshold.
    pub fn score(&self, sentence: &str) -> Result<ScoreResult, ScoringError> {
        self.score_with_threshold(sentence, self.threshold)
    }

    /// Scores with a per-call threshold.
    pub fn score_with_threshold(
        &self,
        sentence: &str,
        threshold: f32,
    ) -> Result<ScoreResult, ScoringError> {
        validate_threshold(threshold)?;

        let tokens = content_tokens(sentence);
        if tokens.is_empty() {
            debug!("No content tokens after filtering");
            return Ok(ScoreResult::no_valid_tokens());
        }

        let token_vectors = self.cache.encode(&tokens)?;

        Ok(accumulate(
            &tokens,
            &token_vectors,
            &self.lexicon,
            &self.anchor_vectors,
            threshold,
        ))
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn lexicon(&self) -> &AnchorLexicon {
        &self.lexicon
    }

    pub fn cache(&self) -> &EmbeddingCache {
        &self.cache
    }
}

fn validate_threshold(threshold: f32) -> Result<(), ScoringError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(ScoringError::InvalidThreshold { value: threshold })
    }
}

/// Similarity join of every token against every anchor.
fn accumulate(
    tokens: &[String],
    token_vectors: &[EmbeddingVector],
    lexicon: &AnchorLexicon,
    anchor_vectors: &[EmbeddingVector],
    threshold: f32,
) -> ScoreResult {
    let mut scores = StateScores::ZERO;
    let mut matched = Vec::new();

    for (token, token_vector) in tokens.iter().zip(token_vectors) {
        for (pos, (anchor, anchor_vector)) in
            lexicon.anchors().iter().zip(anchor_vectors).enumerate()
        {
            let similarity = cosine_similarity(token_vector, anchor_vector);
            if similarity < threshold {
                continue;
            }

            scores.add_scaled(lexicon.weights_at(pos), similarity as f64);
            matched.push(MatchRecord {
                token: token.clone(),
                matched_anchor: anchor.clone(),
                similarity,
            });
        }
    }

    debug!(
        tokens = tokens.len(),
        matches = matched.len(),
        total = scores.total(),
        "Sentence scored"
    );

    ScoreResult::from_scores(&scores, matched)
}
