use super::*;

fn stub() -> MiniLmEmbedder {
    MiniLmEmbedder::stub().expect("stub embedder should load")
}

#[test]
fn test_stub_is_deterministic() {
    let embedder = stub();
    let a = embedder.embed("calm").unwrap();
    let b = embedder.embed("calm").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_stub_distinguishes_inputs() {
    let embedder = stub();
    assert_ne!(embedder.embed("calm").unwrap(), embedder.embed("angry").unwrap());
}

#[test]
fn test_stub_vectors_are_unit_length() {
    let embedder = stub();
    let v = embedder.embed("restless").unwrap();
    assert_eq!(v.len(), MINILM_EMBEDDING_DIM);

    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-4, "norm was {norm}");
}

#[test]
fn test_stub_batch_preserves_order() {
    let embedder = stub();
    let batch = embedder.embed_batch(&["numb", "safe", "numb"]).unwrap();

    assert_eq!(batch.len(), 3);
    assert_eq!(batch[0], embedder.embed("numb").unwrap());
    assert_eq!(batch[1], embedder.embed("safe").unwrap());
    assert_eq!(batch[0], batch[2]);
}

#[test]
fn test_empty_batch() {
    let embedder = stub();
    assert!(embedder.embed_batch(&[]).unwrap().is_empty());
}

#[test]
fn test_stub_reports_mode() {
    let embedder = stub();
    assert!(embedder.is_stub());
    assert!(!embedder.has_model());
    assert_eq!(embedder.embedding_dim(), MINILM_EMBEDDING_DIM);
}

#[test]
fn test_custom_dimension() {
    let embedder = MiniLmEmbedder::load(MiniLmConfig::stub().with_embedding_dim(16)).unwrap();
    assert_eq!(embedder.embed("x").unwrap().len(), 16);
}

#[test]
fn test_missing_model_dir() {
    let dir = tempfile::tempdir().unwrap();
    let err = MiniLmEmbedder::load(MiniLmConfig::new(dir.path().join("nope"))).unwrap_err();
    assert!(matches!(err, EmbeddingError::ModelNotFound { .. }));
}

#[test]
fn test_model_dir_without_files() {
    let dir = tempfile::tempdir().unwrap();
    let err = MiniLmEmbedder::load(MiniLmConfig::new(dir.path())).unwrap_err();
    assert!(matches!(err, EmbeddingError::ModelNotFound { .. }));
}

#[test]
fn test_zero_dimension_rejected() {
    let err = MiniLmEmbedder::load(MiniLmConfig::stub().with_embedding_dim(0)).unwrap_err();
    assert!(matches!(err, EmbeddingError::InvalidConfig { .. }));
}
