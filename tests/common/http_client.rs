//! HTTP client helpers for tests.

use std::time::Duration;

use attune::gateway::{AudioAnalysisResponse, ScoreResponse};
use attune::scoring::Selection;
use attune::state::StateScores;
use serde::{Deserialize, Serialize};
use serde_json::json;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/healthz")).send().await?;
        Self::decode(resp).await
    }

    pub async fn ready(&self) -> Result<ReadyResponse, TestClientError> {
        let resp = self.client.get(self.url("/ready")).send().await?;
        Self::decode(resp).await
    }

    pub async fn words(&self) -> Result<Vec<String>, TestClientError> {
        let resp = self.client.get(self.url("/words")).send().await?;
        Self::decode(resp).await
    }

    pub async fn predict(&self, selections: &[Selection]) -> Result<StateScores, TestClientError> {
        let resp = self
            .client
            .post(self.url("/predict"))
            .json(selections)
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub async fn score(
        &self,
        text: &str,
        threshold: Option<f32>,
    ) -> Result<ScoreResponse, TestClientError> {
        let resp = self
            .client
            .post(self.url("/score"))
            .json(&json!({ "text": text, "threshold": threshold }))
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Uploads `audio` as multipart field `field` to `path`.
    pub async fn upload(
        &self,
        path: &str,
        field: &str,
        audio: Vec<u8>,
    ) -> Result<AudioAnalysisResponse, TestClientError> {
        let part = reqwest::multipart::Part::bytes(audio)
            .file_name("clip.wav")
            .mime_str("audio/wav")?;
        let form = reqwest::multipart::Form::new().part(field.to_string(), part);

        let resp = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, TestClientError> {
        let status = resp.status().as_u16();
        let attune_status = resp
            .headers()
            .get("x-attune-status")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        match status {
            200 => Ok(resp.json().await?),
            400 => Err(TestClientError::BadRequest(resp.json().await?)),
            _ => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus {
                    status,
                    attune_status,
                    body,
                })
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ComponentStatus {
    pub http: String,
    pub anchor_lexicon: usize,
    pub selection_lexicon: usize,
    pub embedder_mode: String,
    pub transcriber: String,
    pub classifier: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub components: ComponentStatus,
}

impl ReadyResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {status} ({attune_status}) - Body: {body}")]
    UnexpectedStatus {
        status: u16,
        attune_status: String,
        body: String,
    },

    #[error("Bad request: {0:?}")]
    BadRequest(ErrorBody),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_url_building() {
        let client = TestClient::new("http://localhost:5000");
        assert_eq!(client.url("/healthz"), "http://localhost:5000/healthz");
        assert_eq!(client.url("healthz"), "http://localhost:5000/healthz");
    }
}
