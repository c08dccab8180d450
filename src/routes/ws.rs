use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers::ws;
use crate::state::AppState;
use std::sync::Arc;

/// Create the WebSocket router.
///
/// The streaming endpoint is addressed by user id; the id is an opaque
/// string, not an authenticated identity. Deployments that need access
/// control should front this with a reverse proxy.
pub fn create_ws_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ws/{user_id}", get(ws::ws_wake_handler))
        .layer(TraceLayer::new_for_http())
}
