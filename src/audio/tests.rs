use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::http::StatusCode;
use axum::routing::post;
use serde_json::json;

use super::*;

async fn spawn_service(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    addr
}

fn echo_len_router() -> Router {
    Router::new()
        .route(
            "/transcribe",
            post(|body: Bytes| async move {
                axum::Json(json!({ "text": format!("heard {} bytes", body.len()) }))
            }),
        )
        .route(
            "/classify",
            post(|_body: Bytes| async { axum::Json(json!({ "label": "calm" })) }),
        )
        .route(
            "/broken",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/garbage",
            post(|| async { axum::Json(json!({ "unexpected": true })) }),
        )
        .route(
            "/blank",
            post(|| async { axum::Json(json!({ "label": "  " })) }),
        )
}

const TIMEOUT: Duration = Duration::from_secs(5);

#[test]
fn test_outcome_fallbacks() {
    assert_eq!(TranscriptionOutcome::Text("hi".into()).into_text(), "hi");
    assert_eq!(TranscriptionOutcome::unavailable("x").into_text(), "");
    assert_eq!(ClassificationOutcome::Label("sad".into()).into_label(), "sad");
    assert_eq!(ClassificationOutcome::unavailable("x").into_label(), "Error");
}

#[tokio::test]
async fn test_disabled_collaborators_are_unavailable() {
    let text = DisabledTranscriber.transcribe(b"RIFF").await;
    let label = DisabledClassifier.classify(b"RIFF").await;

    assert!(matches!(text, TranscriptionOutcome::Unavailable { .. }));
    assert!(matches!(label, ClassificationOutcome::Unavailable { .. }));
    assert_eq!(DisabledTranscriber.kind(), "disabled");
}

#[test]
fn test_invalid_url_rejected() {
    let err = HttpTranscriber::new("not a url", TIMEOUT).unwrap_err();
    assert!(matches!(err, CollaboratorError::InvalidUrl { .. }));

    let err = HttpEmotionClassifier::new("", TIMEOUT).unwrap_err();
    assert!(matches!(err, CollaboratorError::InvalidUrl { .. }));
}

#[tokio::test]
async fn test_http_transcriber_reads_text() {
    let addr = spawn_service(echo_len_router()).await;
    let transcriber = HttpTranscriber::new(&format!("http://{addr}/transcribe"), TIMEOUT).unwrap();

    let outcome = transcriber.transcribe(&[1, 2, 3, 4]).await;

    assert_eq!(outcome, TranscriptionOutcome::Text("heard 4 bytes".into()));
    assert_eq!(transcriber.kind(), "http");
}

#[tokio::test]
async fn test_http_transcriber_failures_are_unavailable() {
    let addr = spawn_service(echo_len_router()).await;

    for path in ["broken", "garbage", "missing"] {
        let transcriber =
            HttpTranscriber::new(&format!("http://{addr}/{path}"), TIMEOUT).unwrap();
        let outcome = transcriber.transcribe(b"audio").await;
        assert!(
            matches!(outcome, TranscriptionOutcome::Unavailable { .. }),
            "{path}: {outcome:?}"
        );
        assert_eq!(outcome.into_text(), "");
    }
}

#[tokio::test]
async fn test_http_transcriber_unreachable_service() {
    // Bind then drop to get a port with no listener.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let transcriber = HttpTranscriber::new(&format!("http://{addr}/"), TIMEOUT).unwrap();

    let outcome = transcriber.transcribe(b"audio").await;
    assert!(matches!(outcome, TranscriptionOutcome::Unavailable { .. }));
}

#[tokio::test]
async fn test_http_classifier_reads_label() {
    let addr = spawn_service(echo_len_router()).await;
    let classifier =
        HttpEmotionClassifier::new(&format!("http://{addr}/classify"), TIMEOUT).unwrap();

    let outcome = classifier.classify(b"audio").await;

    assert_eq!(outcome, ClassificationOutcome::Label("calm".into()));
}

#[tokio::test]
async fn test_http_classifier_failures_become_error_label() {
    let addr = spawn_service(echo_len_router()).await;

    for path in ["broken", "garbage", "blank"] {
        let classifier =
            HttpEmotionClassifier::new(&format!("http://{addr}/{path}"), TIMEOUT).unwrap();
        let outcome = classifier.classify(b"audio").await;
        assert_eq!(outcome.into_label(), "Error", "{path}");
    }
}

#[tokio::test]
async fn test_empty_audio_skips_the_service() {
    let addr = spawn_service(echo_len_router()).await;
    let transcriber = HttpTranscriber::new(&format!("http://{addr}/transcribe"), TIMEOUT).unwrap();
    let classifier =
        HttpEmotionClassifier::new(&format!("http://{addr}/classify"), TIMEOUT).unwrap();

    assert_eq!(
        transcriber.transcribe(&[]).await,
        TranscriptionOutcome::unavailable("empty audio")
    );
    assert_eq!(
        classifier.classify(&[]).await,
        ClassificationOutcome::unavailable("empty audio")
    );
}

#[tokio::test]
async fn test_mocks_count_calls() {
    let transcriber = MockTranscriber::text("I feel calm");
    let classifier = MockClassifier::unavailable("model missing");

    assert_eq!(transcriber.transcribe(b"a").await.into_text(), "I feel calm");
    assert_eq!(classifier.classify(b"a").await.into_label(), "Error");
    assert_eq!(transcriber.call_count(), 1);
    assert_eq!(classifier.call_count(), 1);
}
