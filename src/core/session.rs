//! Per-user session state
//!
//! Each user id maps to exactly one [`UserSession`] holding the configured
//! wake keywords, the enrolled voiceprint, and the verification toggle.
//! Sessions are created lazily on first reference and live for the process
//! lifetime; they are never evicted.
//!
//! Configuration endpoints mutate sessions while streaming connections read
//! them concurrently, so all fields use interior mutability with whole-value
//! swaps: a reader observes either the old or the fully-updated value, never
//! a partial write.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use super::engine::VoiceEmbedding;

/// Error type for session mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The keyword list of a session must never become empty.
    #[error("keyword list must not be empty")]
    EmptyKeywords,
}

/// Per-user configuration and recognition state.
pub struct UserSession {
    /// Configured wake keywords, in match-priority order. Never empty.
    keywords: RwLock<Vec<String>>,
    /// Enrolled voiceprint embedding, if any.
    voiceprint: RwLock<Option<VoiceEmbedding>>,
    /// Whether speaker verification gates wake events for this user.
    verification_enabled: AtomicBool,
}

impl UserSession {
    fn new(default_keyword: &str) -> Self {
        Self {
            keywords: RwLock::new(vec![default_keyword.to_string()]),
            voiceprint: RwLock::new(None),
            verification_enabled: AtomicBool::new(false),
        }
    }

    /// Current keyword list, cloned out so the pipeline holds no lock while
    /// running inference.
    pub fn keywords(&self) -> Vec<String> {
        self.keywords.read().clone()
    }

    /// Replace the keyword list atomically.
    ///
    /// # Errors
    /// Returns [`SessionError::EmptyKeywords`] without touching the session
    /// when the new list is empty.
    pub fn set_keywords(&self, keywords: Vec<String>) -> Result<(), SessionError> {
        if keywords.is_empty() {
            return Err(SessionError::EmptyKeywords);
        }
        *self.keywords.write() = keywords;
        Ok(())
    }

    /// Enroll a voiceprint and enable verification.
    pub fn enroll_voiceprint(&self, embedding: VoiceEmbedding) {
        *self.voiceprint.write() = Some(embedding);
        self.verification_enabled.store(true, Ordering::Release);
    }

    /// Clone of the enrolled voiceprint, if any.
    pub fn voiceprint(&self) -> Option<VoiceEmbedding> {
        self.voiceprint.read().clone()
    }

    /// Whether wake events must pass speaker verification.
    pub fn verification_enabled(&self) -> bool {
        self.verification_enabled.load(Ordering::Acquire)
    }
}

/// Concurrent map of user id to session with atomic get-or-create semantics.
///
/// Sessions accumulate for the process lifetime; on long-running deployments
/// with unbounded user ids this is a resource-growth risk.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<UserSession>>>,
    default_keyword: String,
}

impl SessionStore {
    pub fn new(default_keyword: impl Into<String>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            default_keyword: default_keyword.into(),
        }
    }

    /// Resolve the session for a user id, creating it on first reference.
    ///
    /// Check-and-insert happens under a single write lock, so concurrent
    /// first-time lookups for the same id all observe one session instance.
    pub fn get_or_create(&self, user_id: &str) -> Arc<UserSession> {
        if let Some(session) = self.sessions.read().get(user_id) {
            return session.clone();
        }

        let mut sessions = self.sessions.write();
        sessions
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(UserSession::new(&self.default_keyword)))
            .clone()
    }

    /// Number of sessions created so far.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
