//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `ATTUNE_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PROVIDER_TIMEOUT_SECS, DEFAULT_SCORING_TIMEOUT_MS,
    DEFAULT_SIMILARITY_THRESHOLD,
};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `ATTUNE_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `5000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// `word,hypo,hyper,flow` CSV for semantic scoring.
    pub anchor_lexicon_path: PathBuf,

    /// `word,state,weight` CSV for selection scoring.
    pub selection_lexicon_path: PathBuf,

    /// Sentence-embedding model directory. `None` runs the stub embedder.
    pub model_path: Option<PathBuf>,

    /// Default similarity threshold. Default: `0.7`.
    pub threshold: f32,

    /// Upper bound on one scoring call, in milliseconds. Default: `10000`.
    pub scoring_timeout_ms: u64,

    /// Speech-to-text endpoint. `None` disables transcription.
    pub transcriber_url: Option<String>,

    /// Emotion classifier endpoint. `None` disables classification.
    pub classifier_url: Option<String>,

    /// Request timeout for the collaborator services. Default: `30`.
    pub provider_timeout_secs: u64,

    /// Max accepted upload size. Default: 25 MiB.
    pub max_upload_bytes: usize,
}

/// Default anchor lexicon path used when `ATTUNE_ANCHOR_LEXICON` is not set.
pub const DEFAULT_ANCHOR_LEXICON: &str = "./data/lexicon_for_sentences.csv";

/// Default selection lexicon path used when `ATTUNE_SELECTION_LEXICON` is not set.
pub const DEFAULT_SELECTION_LEXICON: &str = "./data/dataset_with_weights.csv";

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            anchor_lexicon_path: PathBuf::from(DEFAULT_ANCHOR_LEXICON),
            selection_lexicon_path: PathBuf::from(DEFAULT_SELECTION_LEXICON),
            model_path: None,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            scoring_timeout_ms: DEFAULT_SCORING_TIMEOUT_MS,
            transcriber_url: None,
            classifier_url: None,
            provider_timeout_secs: DEFAULT_PROVIDER_TIMEOUT_SECS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "ATTUNE_PORT";
    const ENV_BIND_ADDR: &'static str = "ATTUNE_BIND_ADDR";
    const ENV_ANCHOR_LEXICON: &'static str = "ATTUNE_ANCHOR_LEXICON";
    const ENV_SELECTION_LEXICON: &'static str = "ATTUNE_SELECTION_LEXICON";
    const ENV_MODEL_PATH: &'static str = "ATTUNE_MODEL_PATH";
    const ENV_THRESHOLD: &'static str = "ATTUNE_THRESHOLD";
    const ENV_SCORING_TIMEOUT_MS: &'static str = "ATTUNE_SCORING_TIMEOUT_MS";
    const ENV_TRANSCRIBER_URL: &'static str = "ATTUNE_TRANSCRIBER_URL";
    const ENV_CLASSIFIER_URL: &'static str = "ATTUNE_CLASSIFIER_URL";
    const ENV_PROVIDER_TIMEOUT_SECS: &'static str = "ATTUNE_PROVIDER_TIMEOUT_SECS";
    const ENV_MAX_UPLOAD_BYTES: &'static str = "ATTUNE_MAX_UPLOAD_BYTES";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let anchor_lexicon_path =
            Self::parse_path_from_env(Self::ENV_ANCHOR_LEXICON, defaults.anchor_lexicon_path);
        let selection_lexicon_path = Self::parse_path_from_env(
            Self::ENV_SELECTION_LEXICON,
            defaults.selection_lexicon_path,
        );
        let model_path = Self::parse_optional_from_env(Self::ENV_MODEL_PATH).map(PathBuf::from);
        let threshold = Self::parse_threshold_from_env(defaults.threshold)?;
        let scoring_timeout_ms =
            Self::parse_positive_from_env(Self::ENV_SCORING_TIMEOUT_MS, defaults.scoring_timeout_ms)?;
        let transcriber_url = Self::parse_optional_from_env(Self::ENV_TRANSCRIBER_URL);
        let classifier_url = Self::parse_optional_from_env(Self::ENV_CLASSIFIER_URL);
        let provider_timeout_secs = Self::parse_positive_from_env(
            Self::ENV_PROVIDER_TIMEOUT_SECS,
            defaults.provider_timeout_secs,
        )?;
        let max_upload_bytes =
            Self::parse_positive_from_env(Self::ENV_MAX_UPLOAD_BYTES, defaults.max_upload_bytes)?;

        Ok(Self {
            port,
            bind_addr,
            anchor_lexicon_path,
            selection_lexicon_path,
            model_path,
            threshold,
            scoring_timeout_ms,
            transcriber_url,
            classifier_url,
            provider_timeout_secs,
            max_upload_bytes,
        })
    }

    /// Validates paths and basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::require_file(&self.anchor_lexicon_path)?;
        Self::require_file(&self.selection_lexicon_path)?;

        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidThreshold {
                value: self.threshold,
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn scoring_timeout(&self) -> Duration {
        Duration::from_millis(self.scoring_timeout_ms)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    fn require_file(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_file() {
            return Err(ConfigError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_threshold_from_env(default: f32) -> Result<f32, ConfigError> {
        let Ok(value) = env::var(Self::ENV_THRESHOLD) else {
            return Ok(default);
        };

        let threshold: f32 = value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
            name: Self::ENV_THRESHOLD,
            value: value.clone(),
        })?;

        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidThreshold { value: threshold });
        }

        Ok(threshold)
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_positive_from_env<T>(name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr + PartialEq + Default,
    {
        let Ok(value) = env::var(name) else {
            return Ok(default);
        };

        match value.trim().parse::<T>() {
            Ok(parsed) if parsed != T::default() => Ok(parsed),
            _ => Err(ConfigError::InvalidNumber { name, value }),
        }
    }
}
