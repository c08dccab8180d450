//! Speaker verification
//!
//! Compares an enrolled voiceprint against a freshly captured candidate via
//! cosine similarity. Pure functions; no side effects.

/// Similarity threshold above which two embeddings are considered the same
/// speaker. A single global constant; not user-configurable.
pub const SPEAKER_THRESHOLD: f32 = 0.5;

/// Error type for verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    /// One of the embeddings has zero norm, so cosine similarity is
    /// undefined.
    #[error("embedding has zero norm")]
    DegenerateEmbedding,
    #[error("embedding dimensions differ: {enrolled} vs {candidate}")]
    DimensionMismatch { enrolled: usize, candidate: usize },
}

/// Outcome of one verification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerifyOutcome {
    pub is_same: bool,
    /// Cosine similarity in [-1, 1].
    pub score: f32,
}

/// Cosine similarity of two nonzero vectors: `(a·b) / (|a||b|)`.
///
/// # Errors
/// Fails when the vectors differ in dimension or either has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, VerifyError> {
    if a.len() != b.len() {
        return Err(VerifyError::DimensionMismatch {
            enrolled: a.len(),
            candidate: b.len(),
        });
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (&x, &y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(VerifyError::DegenerateEmbedding);
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

/// Verify a candidate voiceprint against the enrolled one.
///
/// `is_same` is true when the similarity score exceeds
/// [`SPEAKER_THRESHOLD`].
pub fn verify(enrolled: &[f32], candidate: &[f32]) -> Result<VerifyOutcome, VerifyError> {
    let score = cosine_similarity(enrolled, candidate)?;
    Ok(VerifyOutcome {
        is_same: score > SPEAKER_THRESHOLD,
        score,
    })
}
