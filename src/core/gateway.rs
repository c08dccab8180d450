//! Inference gateway
//!
//! Serialized-access wrapper around the process-wide speech-to-text and
//! speaker-embedding engines. The gateway owns the only engine handles and
//! guards each with its own mutex: concurrent connections never execute
//! inside the same engine simultaneously, while transcription and embedding
//! may overlap with each other.
//!
//! Failure policy: engine failures never propagate to the transport.
//! `transcribe` degrades to an empty transcription carrying the error text;
//! `embed` degrades to `None`, which callers treat as "skip verification".

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::error;

use super::engine::{SpeakerEncoder, SpeechTranscriber, VoiceEmbedding};

/// Result of one transcription call.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptionResult {
    /// Transcribed text; empty when the engine failed.
    pub text: String,
    /// Engine error message, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Serialized-access wrapper around the inference engines.
///
/// Constructed once at startup and shared across connection handlers via
/// `Arc` through [`AppState`](crate::state::AppState).
pub struct InferenceGateway {
    transcriber: Mutex<Box<dyn SpeechTranscriber>>,
    encoder: Option<Mutex<Box<dyn SpeakerEncoder>>>,
    language: String,
    // Engine names captured at construction so the health endpoint does not
    // have to contend for the engine locks.
    engine_names: Vec<String>,
}

impl InferenceGateway {
    /// Create a gateway owning the given engines.
    ///
    /// `language` is the deployment locale every transcription is pinned to.
    /// The speaker encoder is optional: without one, verification degrades
    /// to "unavailable" instead of failing startup.
    pub fn new(
        transcriber: Box<dyn SpeechTranscriber>,
        encoder: Option<Box<dyn SpeakerEncoder>>,
        language: impl Into<String>,
    ) -> Self {
        let mut engine_names = vec![transcriber.name().to_string()];
        if let Some(encoder) = &encoder {
            engine_names.push(encoder.name().to_string());
        }

        Self {
            transcriber: Mutex::new(transcriber),
            encoder: encoder.map(Mutex::new),
            language: language.into(),
            engine_names,
        }
    }

    /// Transcribe audio samples, holding the transcriber lock for the
    /// duration of the engine call.
    ///
    /// Never fails: on engine error the result carries empty text and the
    /// error message, so a single bad chunk cannot crash a session.
    pub async fn transcribe(&self, samples: &[f32]) -> TranscriptionResult {
        let transcriber = self.transcriber.lock().await;
        match transcriber.transcribe(samples, &self.language).await {
            Ok(text) => TranscriptionResult { text, error: None },
            Err(e) => {
                error!("Transcription failed: {}", e);
                TranscriptionResult {
                    text: String::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Extract a voiceprint embedding, holding the encoder lock for the
    /// duration of the engine call.
    ///
    /// Returns `None` when no encoder is configured or the engine fails.
    /// Callers must treat `None` as "skip verification", never as a
    /// negative match.
    pub async fn embed(&self, samples: &[f32]) -> Option<VoiceEmbedding> {
        let encoder = self.encoder.as_ref()?;
        let encoder = encoder.lock().await;
        match encoder.encode(samples).await {
            Ok(embedding) => Some(embedding),
            Err(e) => {
                error!("Voiceprint extraction failed: {}", e);
                None
            }
        }
    }

    /// Whether a speaker encoder is available.
    pub fn has_speaker_encoder(&self) -> bool {
        self.encoder.is_some()
    }

    /// Names of the loaded engines, for the health endpoint.
    pub fn loaded_engines(&self) -> &[String] {
        &self.engine_names
    }
}
