//! Wake decision engine
//!
//! Pure functions deciding wake/no-wake from a transcript and the configured
//! keyword list. Detection is literal substring containment, reproducing the
//! simple, occasionally-false-positive semantics of keyword spotting on
//! transcribed text: "你好星年，开灯" matches the keyword "你好星年".

use serde::Serialize;

use super::gateway::TranscriptionResult;

/// Decision emitted once per processed audio chunk.
///
/// `speaker_verified` is true only when the wake was detected, verification
/// is enabled for the session, a voiceprint is enrolled, and the candidate
/// embedding cleared the similarity threshold.
#[derive(Debug, Clone, Serialize)]
pub struct WakeDecision {
    /// Transcribed text, reported even on no-wake for diagnostics.
    pub text: String,
    pub wake_detected: bool,
    /// First configured keyword found in the text, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wake_word: Option<String>,
    pub speaker_verified: bool,
    pub speaker_score: f32,
}

impl WakeDecision {
    /// Fully negative decision with empty text. Substituted when a chunk
    /// cannot be processed at all, so the caller still gets its reply.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            wake_detected: false,
            wake_word: None,
            speaker_verified: false,
            speaker_score: 0.0,
        }
    }

    /// Build the core decision fields from a transcription and the keyword
    /// list. Verification fields start out negative and are filled in by the
    /// connection handler when verification applies.
    pub fn from_transcription(result: &TranscriptionResult, keywords: &[String]) -> Self {
        let matched = detect_wake(&result.text, keywords);
        Self {
            text: result.text.clone(),
            wake_detected: matched.is_some(),
            wake_word: matched.map(str::to_string),
            speaker_verified: false,
            speaker_score: 0.0,
        }
    }
}

/// Return the first keyword, in configured order, that appears literally in
/// the text. Safe to call concurrently; reads only.
pub fn detect_wake<'a>(text: &str, keywords: &'a [String]) -> Option<&'a str> {
    keywords
        .iter()
        .find(|keyword| text.contains(keyword.as_str()))
        .map(String::as_str)
}
