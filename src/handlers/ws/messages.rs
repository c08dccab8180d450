//! WebSocket reply messages
//!
//! The wire contract sends plain JSON objects, so the enum serializes
//! untagged: a decision reply carries the decision fields directly, an error
//! reply carries just `{"error": "..."}`.

use serde::Serialize;

use crate::core::wake::WakeDecision;

/// Message sent back to the streaming client.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OutgoingMessage {
    /// One decision per inbound audio chunk.
    Decision(WakeDecision),
    /// Protocol-level complaint (e.g., unexpected text frame). The
    /// connection stays open.
    Error { error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_serializes_flat() {
        let msg = OutgoingMessage::Decision(WakeDecision {
            text: "你好星年".to_string(),
            wake_detected: true,
            wake_word: Some("你好星年".to_string()),
            speaker_verified: false,
            speaker_score: 0.0,
        });

        let json: serde_json::Value = serde_json::from_str(&serde_json::to_string(&msg).unwrap()).unwrap();
        assert_eq!(json["text"], "你好星年");
        assert_eq!(json["wake_detected"], true);
        assert_eq!(json["wake_word"], "你好星年");
        assert_eq!(json["speaker_verified"], false);
    }

    #[test]
    fn test_no_wake_omits_wake_word() {
        let msg = OutgoingMessage::Decision(WakeDecision {
            text: "现在几点了".to_string(),
            wake_detected: false,
            wake_word: None,
            speaker_verified: false,
            speaker_score: 0.0,
        });

        let json: serde_json::Value = serde_json::from_str(&serde_json::to_string(&msg).unwrap()).unwrap();
        assert_eq!(json["wake_detected"], false);
        assert!(json.get("wake_word").is_none());
    }

    #[test]
    fn test_error_shape() {
        let msg = OutgoingMessage::Error {
            error: "binary audio expected".to_string(),
        };
        let json: serde_json::Value = serde_json::from_str(&serde_json::to_string(&msg).unwrap()).unwrap();
        assert_eq!(json["error"], "binary audio expected");
    }
}
