//! # WebSocket streaming wake detection
//!
//! Per-user streaming endpoint at `/ws/{user_id}`. The client sends binary
//! messages, each one raw little-endian PCM16 mono audio at 16 kHz; the
//! server replies with exactly one JSON decision per chunk, in order:
//!
//! ```json
//! {
//!   "text": "你好星年，开灯",
//!   "wake_detected": true,
//!   "wake_word": "你好星年",
//!   "speaker_verified": false,
//!   "speaker_score": 0.0
//! }
//! ```
//!
//! Malformed chunks and engine failures degrade the reply instead of closing
//! the connection; the session ends only on transport close.

pub mod handler;
pub mod messages;
pub mod processor;

// Re-export commonly used items
pub use handler::ws_wake_handler;
pub use messages::OutgoingMessage;
