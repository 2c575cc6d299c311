/// Cosine similarity of two vectors, accumulated in `f64`.
///
/// Returns `0.0` when either vector has zero magnitude or the lengths differ.
/// Identical non-zero vectors score exactly `1.0`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    // sqrt(n * n) == n exactly, so a == b yields dot / norm == 1.0.
    let sim = dot / (norm_a * norm_b).sqrt();
    sim.clamp(-1.0, 1.0) as f32
}
