use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, keywords, voice};
use crate::state::AppState;
use std::sync::Arc;

/// Create the HTTP API router: health plus the configuration endpoints that
/// mutate user sessions.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(api::health_check))
        .route("/set_wake_word", post(keywords::set_wake_word))
        .route("/set_keywords", post(keywords::set_keywords))
        .route("/get_keywords/{user_id}", get(keywords::get_keywords))
        .route("/register_voice", post(voice::register_voice))
        .route("/recognize", post(voice::recognize))
        .layer(TraceLayer::new_for_http())
}
