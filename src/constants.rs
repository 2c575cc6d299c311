//! Cross-cutting, shared constants.
//!
//! Defaults here are the demo values the lexicons and thresholds were tuned against;
//! runtime overrides go through [`crate::config::Config`].

/// Output dimension of the default sentence-embedding model (all-MiniLM-L6-v2).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max tokens fed to the embedding model per input.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Minimum cosine similarity for a token/anchor pair to contribute.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.70;

/// Upper bound on a single scoring call (embedding inference included).
pub const DEFAULT_SCORING_TIMEOUT_MS: u64 = 10_000;

/// Request timeout for the HTTP transcription / classification collaborators.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Max accepted size of an uploaded audio file.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Emotion label reported when the classifier cannot produce one.
pub const EMOTION_ERROR_LABEL: &str = "Error";

/// Label for inputs that leave no tokens after stopword filtering.
pub const LABEL_NO_VALID_TOKENS: &str = "No valid tokens";

/// Label for inputs where no token cleared the similarity threshold.
pub const LABEL_NO_RELEVANT_KEYWORDS: &str = "No relevant keywords found";

/// Words offered by the selection UI, three per state (hypo, hyper, flow).
pub const DEMO_WORDS: [&str; 9] = [
    "numb", "frozen", "empty", "anxious", "restless", "angry", "calm", "safe", "relaxed",
];
