//! Response envelope types for the session endpoints.
//!
//! Session routes answer with named envelopes (`{ "sessions", "count" }`,
//! `{ "session" }`, `{ "message", "session" }`) rather than ad-hoc
//! `serde_json::json!` values, for compile-time type safety.

use serde::Serialize;
use wellness_core::session::Session;

/// `{ "sessions": [...], "count": n }`
#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<Session>,
    pub count: usize,
}

impl From<Vec<Session>> for SessionListResponse {
    fn from(sessions: Vec<Session>) -> Self {
        Self {
            count: sessions.len(),
            sessions,
        }
    }
}

/// `{ "session": {...} }`
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: Session,
}

/// `{ "message": "...", "session": {...} }` returned by save-draft / publish.
#[derive(Debug, Serialize)]
pub struct SessionSavedResponse {
    pub message: &'static str,
    pub session: Session,
}
