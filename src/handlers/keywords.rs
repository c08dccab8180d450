//! Keyword configuration endpoints
//!
//! Mutate the wake configuration of a user session. Safe to call while a
//! streaming connection for the same user is active: the session swaps the
//! keyword list atomically, so the pipeline observes either the old or the
//! new list. Invalid requests are rejected without touching any session.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::errors::app_error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetWakeWordRequest {
    pub user_id: String,
    pub wake_word: String,
}

/// Keywords may arrive as a JSON list or a comma-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum KeywordsField {
    List(Vec<String>),
    Csv(String),
}

#[derive(Debug, Deserialize)]
pub struct SetKeywordsRequest {
    pub user_id: String,
    pub keywords: KeywordsField,
}

impl KeywordsField {
    /// Normalize into a trimmed, non-empty keyword list.
    fn into_keywords(self) -> Vec<String> {
        let raw = match self {
            KeywordsField::List(list) => list,
            KeywordsField::Csv(csv) => csv.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect()
    }
}

/// Set a single wake phrase for a user, replacing the keyword list.
pub async fn set_wake_word(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetWakeWordRequest>,
) -> AppResult<Json<Value>> {
    let wake_word = req.wake_word.trim().to_string();
    if req.user_id.is_empty() || wake_word.is_empty() {
        return Err(AppError::BadRequest(
            "Missing user_id or wake_word".to_string(),
        ));
    }

    let session = state.sessions.get_or_create(&req.user_id);
    session
        .set_keywords(vec![wake_word.clone()])
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    info!("User {} set wake word: {}", req.user_id, wake_word);
    Ok(Json(json!({ "status": "ok", "wake_word": wake_word })))
}

/// Set the full keyword list for a user.
pub async fn set_keywords(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetKeywordsRequest>,
) -> AppResult<Json<Value>> {
    if req.user_id.is_empty() {
        return Err(AppError::BadRequest("Missing user_id".to_string()));
    }

    let keywords = req.keywords.into_keywords();
    if keywords.is_empty() {
        return Err(AppError::BadRequest(
            "Missing user_id or keywords".to_string(),
        ));
    }

    let session = state.sessions.get_or_create(&req.user_id);
    session
        .set_keywords(keywords.clone())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    info!("User {} set keywords: {:?}", req.user_id, keywords);
    Ok(Json(json!({ "status": "ok", "keywords": keywords })))
}

/// Get the current keyword list for a user.
pub async fn get_keywords(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Json<Value> {
    let session = state.sessions.get_or_create(&user_id);
    Json(json!({ "status": "ok", "keywords": session.keywords() }))
}
