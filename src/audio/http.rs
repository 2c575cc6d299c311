//! HTTP-backed collaborators.
//!
//! Both clients POST the raw upload bytes as `application/octet-stream` and read a
//! small JSON reply: `{"text": ...}` for transcription, `{"label": ...}` for
//! classification.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::CollaboratorError;
use super::{ClassificationOutcome, EmotionClassifier, TranscriptionOutcome, Transcriber};

#[derive(Debug, Deserialize)]
struct TranscriptionReply {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ClassificationReply {
    label: String,
}

/// Shared POST-and-decode plumbing.
#[derive(Debug, Clone)]
struct AudioEndpoint {
    client: Client,
    url: Url,
}

impl AudioEndpoint {
    fn new(url: &str, timeout: Duration) -> Result<Self, CollaboratorError> {
        let url = Url::parse(url).map_err(|_| CollaboratorError::InvalidUrl {
            value: url.to_string(),
        })?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    async fn post<T: DeserializeOwned>(&self, audio: &[u8]) -> Result<T, String> {
        let response = self
            .client
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .body(audio.to_vec())
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("service returned {status}: {body}"));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| format!("malformed reply: {e}"))
    }
}

/// Speech-to-text over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTranscriber {
    endpoint: AudioEndpoint,
}

impl HttpTranscriber {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, CollaboratorError> {
        Ok(Self {
            endpoint: AudioEndpoint::new(url, timeout)?,
        })
    }

    pub fn url(&self) -> &str {
        self.endpoint.url.as_str()
    }
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    #[tracing::instrument(skip_all, fields(bytes = audio.len()))]
    async fn transcribe(&self, audio: &[u8]) -> TranscriptionOutcome {
        if audio.is_empty() {
            return TranscriptionOutcome::unavailable("empty audio");
        }

        match self.endpoint.post::<TranscriptionReply>(audio).await {
            Ok(reply) => {
                debug!(chars = reply.text.len(), "Transcription received");
                TranscriptionOutcome::Text(reply.text)
            }
            Err(reason) => {
                warn!(url = %self.endpoint.url, %reason, "Transcription failed");
                TranscriptionOutcome::Unavailable { reason }
            }
        }
    }

    fn kind(&self) -> &'static str {
        "http"
    }
}

/// Emotion classification over HTTP.
#[derive(Debug, Clone)]
pub struct HttpEmotionClassifier {
    endpoint: AudioEndpoint,
}

impl HttpEmotionClassifier {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, CollaboratorError> {
        Ok(Self {
            endpoint: AudioEndpoint::new(url, timeout)?,
        })
    }

    pub fn url(&self) -> &str {
        self.endpoint.url.as_str()
    }
}

#[async_trait]
impl EmotionClassifier for HttpEmotionClassifier {
    #[tracing::instrument(skip_all, fields(bytes = audio.len()))]
    async fn classify(&self, audio: &[u8]) -> ClassificationOutcome {
        // Nothing to extract features from.
        if audio.is_empty() {
            return ClassificationOutcome::unavailable("empty audio");
        }

        match self.endpoint.post::<ClassificationReply>(audio).await {
            Ok(reply) if reply.label.trim().is_empty() => {
                warn!(url = %self.endpoint.url, "Classifier returned an empty label");
                ClassificationOutcome::unavailable("empty label")
            }
            Ok(reply) => {
                debug!(label = %reply.label, "Emotion classified");
                ClassificationOutcome::Label(reply.label)
            }
            Err(reason) => {
                warn!(url = %self.endpoint.url, %reason, "Emotion classification failed");
                ClassificationOutcome::Unavailable { reason }
            }
        }
    }

    fn kind(&self) -> &'static str {
        "http"
    }
}
