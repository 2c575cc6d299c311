//! Attune HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use attune::audio::{
    DisabledClassifier, DisabledTranscriber, EmotionClassifier, HttpEmotionClassifier,
    HttpTranscriber, Transcriber,
};
use attune::config::Config;
use attune::embedding::{EmbeddingCache, EmbeddingProvider, MiniLmConfig, MiniLmEmbedder};
use attune::gateway::{HandlerState, create_router_with_state};
use attune::lexicon::{AnchorLexicon, SelectionLexicon};
use attune::scoring::{SelectionScorer, SimilarityScorer};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        threshold = config.threshold,
        "Attune starting"
    );

    let anchors = Arc::new(AnchorLexicon::from_path(&config.anchor_lexicon_path)?);
    let selections = Arc::new(SelectionLexicon::from_path(&config.selection_lexicon_path)?);

    let minilm_config = if let Some(path) = &config.model_path {
        MiniLmConfig::new(path.clone())
    } else {
        tracing::warn!("No ATTUNE_MODEL_PATH configured, running embedder in stub mode");
        MiniLmConfig::stub()
    };
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(MiniLmEmbedder::load(minilm_config)?);
    let cache = Arc::new(EmbeddingCache::new(embedder));

    tracing::info!(anchors = anchors.len(), "Precomputing anchor embeddings");
    let threshold = config.threshold;
    let scorer =
        tokio::task::spawn_blocking(move || SimilarityScorer::new(anchors, cache, threshold))
            .await??;

    let state = HandlerState::new(
        Arc::new(scorer),
        SelectionScorer::new(selections),
        build_transcriber(&config)?,
        build_classifier(&config)?,
    )
    .with_scoring_timeout(config.scoring_timeout())
    .with_max_upload_bytes(config.max_upload_bytes);

    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Attune shutdown complete");
    Ok(())
}

fn build_transcriber(config: &Config) -> anyhow::Result<Arc<dyn Transcriber>> {
    match &config.transcriber_url {
        Some(url) => {
            tracing::info!(url = %url, "Using HTTP transcriber");
            Ok(Arc::new(HttpTranscriber::new(url, config.provider_timeout())?))
        }
        None => {
            tracing::warn!(
                "No ATTUNE_TRANSCRIBER_URL configured, audio uploads will score empty text"
            );
            Ok(Arc::new(DisabledTranscriber))
        }
    }
}

fn build_classifier(config: &Config) -> anyhow::Result<Arc<dyn EmotionClassifier>> {
    match &config.classifier_url {
        Some(url) => {
            tracing::info!(url = %url, "Using HTTP emotion classifier");
            Ok(Arc::new(HttpEmotionClassifier::new(
                url,
                config.provider_timeout(),
            )?))
        }
        None => {
            tracing::warn!("No ATTUNE_CLASSIFIER_URL configured, emotion will report Error");
            Ok(Arc::new(DisabledClassifier))
        }
    }
}

async fn run_health_check() -> i32 {
    let port = std::env::var("ATTUNE_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(5000);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(client) = reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    else {
        return 1;
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
