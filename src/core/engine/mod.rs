//! Inference engine interfaces
//!
//! The expensive speech-to-text and speaker-embedding engines live behind
//! these traits. Engines are constructed once at startup and injected into
//! the [`InferenceGateway`](crate::core::gateway::InferenceGateway), which
//! owns the only handles and serializes access to each engine.

use async_trait::async_trait;

pub mod http;

pub use http::{HttpSpeakerEncoder, HttpTranscriber};

/// A fixed-dimension vector representing speaker identity.
pub type VoiceEmbedding = Vec<f32>;

/// Error type for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("engine returned malformed response: {0}")]
    MalformedResponse(String),
    #[error("engine failure: {0}")]
    Other(String),
}

/// Speech-to-text engine.
///
/// Implementations are not assumed to be reentrant; the gateway guarantees
/// that at most one `transcribe` call executes at a time process-wide.
#[async_trait]
pub trait SpeechTranscriber: Send + Sync {
    /// Transcribe normalized f32 samples into text.
    async fn transcribe(&self, samples: &[f32], language: &str) -> Result<String, EngineError>;

    /// Engine identifier reported by the health endpoint.
    fn name(&self) -> &'static str;
}

/// Speaker-embedding engine.
///
/// Same reentrancy contract as [`SpeechTranscriber`]: the gateway serializes
/// `encode` calls, independently of transcription.
#[async_trait]
pub trait SpeakerEncoder: Send + Sync {
    /// Extract a voiceprint embedding from normalized f32 samples.
    async fn encode(&self, samples: &[f32]) -> Result<VoiceEmbedding, EngineError>;

    /// Engine identifier reported by the health endpoint.
    fn name(&self) -> &'static str;
}
