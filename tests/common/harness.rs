//! Test server harness.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use attune::audio::{
    ClassificationOutcome, EmotionClassifier, MockClassifier, MockTranscriber, Transcriber,
    TranscriptionOutcome,
};
use attune::embedding::{EmbeddingCache, EmbeddingProvider, MockEmbeddingProvider};
use attune::gateway::{HandlerState, create_router_with_state};
use attune::lexicon::{AnchorLexicon, SelectionLexicon};
use attune::scoring::{SelectionScorer, SimilarityScorer};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

pub fn bundled_anchor_lexicon() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/lexicon_for_sentences.csv")
}

pub fn bundled_selection_lexicon() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/dataset_with_weights.csv")
}

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub port: u16,
    pub anchor_lexicon: PathBuf,
    pub selection_lexicon: PathBuf,
    pub threshold: f32,
    pub transcription: TranscriptionOutcome,
    pub emotion: ClassificationOutcome,
    pub scoring_timeout: Duration,
    pub embedding_delay: Option<Duration>,
    pub max_upload_bytes: usize,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            port: 0,
            anchor_lexicon: bundled_anchor_lexicon(),
            selection_lexicon: bundled_selection_lexicon(),
            threshold: 0.70,
            transcription: TranscriptionOutcome::Text("I feel calm".to_string()),
            emotion: ClassificationOutcome::Label("neutral".to_string()),
            scoring_timeout: Duration::from_secs(10),
            embedding_delay: None,
            max_upload_bytes: attune::constants::DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl TestServerConfig {
    pub fn transcribing(mut self, text: &str) -> Self {
        self.transcription = TranscriptionOutcome::Text(text.to_string());
        self
    }

    pub fn with_transcription(mut self, outcome: TranscriptionOutcome) -> Self {
        self.transcription = outcome;
        self
    }

    pub fn with_emotion(mut self, outcome: ClassificationOutcome) -> Self {
        self.emotion = outcome;
        self
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn find_available_port() -> std::io::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    Ok(addr.port())
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

/// Spawns a server with the bundled lexicons, a mock embedder and scripted collaborators.
///
/// The mock embedder maps identical words to identical vectors and unrelated words to
/// near-orthogonal ones, so only exact anchor words match at the default threshold.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let port = if config.port == 0 {
        find_available_port().await?
    } else {
        config.port
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let anchors = AnchorLexicon::from_path(&config.anchor_lexicon)
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
    let selections = SelectionLexicon::from_path(&config.selection_lexicon)
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    let mut provider = MockEmbeddingProvider::new();
    if let Some(delay) = config.embedding_delay {
        provider = provider.with_delay(delay);
    }
    let provider: Arc<dyn EmbeddingProvider> = Arc::new(provider);
    let cache = Arc::new(EmbeddingCache::new(provider));

    let scorer = SimilarityScorer::new(Arc::new(anchors), cache, config.threshold)
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    let transcriber: Arc<dyn Transcriber> =
        Arc::new(MockTranscriber::with_outcome(config.transcription));
    let classifier: Arc<dyn EmotionClassifier> =
        Arc::new(MockClassifier::with_outcome(config.emotion));

    let state = HandlerState::new(
        Arc::new(scorer),
        SelectionScorer::new(Arc::new(selections)),
        transcriber,
        classifier,
    )
    .with_scoring_timeout(config.scoring_timeout)
    .with_max_upload_bytes(config.max_upload_bytes);

    let app = create_router_with_state(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
