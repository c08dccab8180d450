//! Voice enrollment and one-shot recognition endpoints
//!
//! Both accept multipart uploads with a `user_id` text field and an `audio`
//! file field carrying raw little-endian PCM16 mono at 16 kHz.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State},
};
use bytes::Bytes;
use serde_json::{Value, json};
use tracing::info;

use crate::core::audio::decode_pcm16;
use crate::core::verify;
use crate::core::wake::WakeDecision;
use crate::errors::app_error::{AppError, AppResult};
use crate::state::AppState;

struct VoiceUpload {
    user_id: String,
    audio: Bytes,
}

/// Pull `user_id` and `audio` out of a multipart body.
///
/// Missing or unreadable fields are configuration errors: reported as 4xx,
/// no session is touched.
async fn read_voice_upload(mut multipart: Multipart) -> AppResult<VoiceUpload> {
    let mut user_id: Option<String> = None;
    let mut audio: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("user_id") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid user_id field: {e}")))?;
                user_id = Some(value);
            }
            Some("audio") => {
                let value = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid audio field: {e}")))?;
                audio = Some(value);
            }
            _ => continue,
        }
    }

    match (user_id, audio) {
        (Some(user_id), Some(audio)) if !user_id.is_empty() => Ok(VoiceUpload { user_id, audio }),
        _ => Err(AppError::BadRequest(
            "Missing user_id or audio".to_string(),
        )),
    }
}

/// Register a voiceprint for a user from an uploaded audio sample.
///
/// On success the embedding is enrolled and verification is enabled for the
/// session. Encoder absence or failure is a server error, matching the
/// enrollment contract: a user who asked for verification must not silently
/// end up without a voiceprint.
pub async fn register_voice(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> AppResult<Json<Value>> {
    let upload = read_voice_upload(multipart).await?;
    let samples = decode_pcm16(&upload.audio).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let embedding = state
        .gateway
        .embed(&samples)
        .await
        .ok_or_else(|| AppError::InternalServerError("Voiceprint extraction failed".to_string()))?;

    let session = state.sessions.get_or_create(&upload.user_id);
    session.enroll_voiceprint(embedding);

    info!("User {} registered voiceprint", upload.user_id);
    Ok(Json(json!({
        "status": "ok",
        "message": "Voiceprint registered"
    })))
}

/// One-shot recognition: run the full wake pipeline over a single uploaded
/// audio sample and return the decision.
pub async fn recognize(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> AppResult<Json<WakeDecision>> {
    let upload = read_voice_upload(multipart).await?;
    let samples = decode_pcm16(&upload.audio).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let session = state.sessions.get_or_create(&upload.user_id);
    let keywords = session.keywords();
    let transcription = state.gateway.transcribe(&samples).await;
    let mut decision = WakeDecision::from_transcription(&transcription, &keywords);
    // The one-shot reply always names the configured wake phrase, matched
    // or not
    if decision.wake_word.is_none() {
        decision.wake_word = keywords.first().cloned();
    }

    if decision.wake_detected && session.verification_enabled() {
        if let (Some(enrolled), Some(candidate)) =
            (session.voiceprint(), state.gateway.embed(&samples).await)
        {
            match verify::verify(&enrolled, &candidate) {
                Ok(outcome) => {
                    decision.speaker_verified = outcome.is_same;
                    decision.speaker_score = outcome.score;
                }
                Err(e) => {
                    tracing::warn!("Speaker verification failed for {}: {}", upload.user_id, e);
                }
            }
        }
    }

    Ok(Json(decision))
}
