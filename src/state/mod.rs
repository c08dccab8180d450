use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::gateway::InferenceGateway;
use crate::core::session::SessionStore;

/// Application state that can be shared across handlers
///
/// Owns the inference gateway (the only engine handles in the process) and
/// the session store. Cloning is cheap; everything heavy is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    /// Serialized-access wrapper around the inference engines
    pub gateway: Arc<InferenceGateway>,
    /// Per-user sessions, created lazily on first reference
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Create application state around an already-constructed gateway.
    ///
    /// Engine construction is the caller's responsibility (and is where
    /// startup-fatal errors surface); this lets tests inject mock engines.
    pub fn new(config: ServerConfig, gateway: InferenceGateway) -> Arc<Self> {
        let sessions = Arc::new(SessionStore::new(&config.default_wake_word));

        Arc::new(Self {
            config,
            gateway: Arc::new(gateway),
            sessions,
        })
    }
}
