//! Scripted collaborators for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{ClassificationOutcome, EmotionClassifier, TranscriptionOutcome, Transcriber};

/// Transcriber returning a fixed outcome.
#[derive(Debug)]
pub struct MockTranscriber {
    outcome: TranscriptionOutcome,
    calls: AtomicUsize,
}

impl MockTranscriber {
    pub fn text(text: &str) -> Self {
        Self::with_outcome(TranscriptionOutcome::Text(text.to_string()))
    }

    pub fn unavailable(reason: &str) -> Self {
        Self::with_outcome(TranscriptionOutcome::unavailable(reason))
    }

    pub fn with_outcome(outcome: TranscriptionOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _audio: &[u8]) -> TranscriptionOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }

    fn kind(&self) -> &'static str {
        "mock"
    }
}

/// Classifier returning a fixed outcome.
#[derive(Debug)]
pub struct MockClassifier {
    outcome: ClassificationOutcome,
    calls: AtomicUsize,
}

impl MockClassifier {
    pub fn label(label: &str) -> Self {
        Self::with_outcome(ClassificationOutcome::Label(label.to_string()))
    }

    pub fn unavailable(reason: &str) -> Self {
        Self::with_outcome(ClassificationOutcome::unavailable(reason))
    }

    pub fn with_outcome(outcome: ClassificationOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmotionClassifier for MockClassifier {
    async fn classify(&self, _audio: &[u8]) -> ClassificationOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }

    fn kind(&self) -> &'static str {
        "mock"
    }
}
