//! Per-chunk wake pipeline
//!
//! Decode → transcribe → wake decision → conditional speaker verification.
//! Every step degrades rather than propagates: malformed chunks and engine
//! failures yield a negative decision, and the connection loop keeps
//! running. Every chunk gets exactly one decision back, so clients can pair
//! replies to chunks by arrival order alone.

use tracing::{debug, warn};

use crate::core::audio::decode_pcm16;
use crate::core::gateway::InferenceGateway;
use crate::core::session::UserSession;
use crate::core::verify;
use crate::core::wake::WakeDecision;

/// Run the wake pipeline for one inbound audio chunk.
///
/// Always returns a decision that is safe to send, whatever the chunk or
/// the engines did: a malformed chunk substitutes the empty negative
/// decision so the one-reply-per-chunk cadence holds.
pub async fn process_chunk(
    data: &[u8],
    session: &UserSession,
    gateway: &InferenceGateway,
) -> WakeDecision {
    let samples = match decode_pcm16(data) {
        Ok(samples) => samples,
        Err(e) => {
            // Partial or corrupt frames must not terminate a live session
            warn!("Malformed audio chunk, substituting empty decision: {}", e);
            return WakeDecision::empty();
        }
    };
    debug!(
        "Received audio chunk: {:.2}s",
        samples.len() as f32 / crate::core::audio::SAMPLE_RATE as f32
    );

    let transcription = gateway.transcribe(&samples).await;
    let mut decision = WakeDecision::from_transcription(&transcription, &session.keywords());

    // speaker_verified can only become true when the wake fired, the session
    // opted in, and a voiceprint is enrolled
    if decision.wake_detected && session.verification_enabled() {
        if let Some(enrolled) = session.voiceprint() {
            // embed() returning None means "skip verification", not a
            // negative match; the decision stays false/0.0 either way
            if let Some(candidate) = gateway.embed(&samples).await {
                match verify::verify(&enrolled, &candidate) {
                    Ok(outcome) => {
                        decision.speaker_verified = outcome.is_same;
                        decision.speaker_score = outcome.score;
                    }
                    Err(e) => {
                        warn!("Speaker verification failed: {}", e);
                    }
                }
            }
        }
    }

    decision
}
