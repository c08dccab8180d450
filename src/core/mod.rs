pub mod audio;
pub mod engine;
pub mod gateway;
pub mod session;
pub mod verify;
pub mod wake;

// Re-export commonly used types for convenience
pub use audio::{AudioError, decode_pcm16};
pub use engine::{EngineError, SpeakerEncoder, SpeechTranscriber, VoiceEmbedding};
pub use gateway::{InferenceGateway, TranscriptionResult};
pub use session::{SessionError, SessionStore, UserSession};
pub use verify::{SPEAKER_THRESHOLD, VerifyError, VerifyOutcome, cosine_similarity, verify};
pub use wake::{WakeDecision, detect_wake};
