use std::sync::Arc;

use axum::{extract::State, response::Json};
use serde_json::{Value, json};

use crate::state::AppState;

/// Health check handler
/// Reports which inference engines are currently loaded
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "loaded_engines": state.gateway.loaded_engines(),
    }))
}
