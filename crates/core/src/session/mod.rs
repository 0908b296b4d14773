//! Session model, wire DTOs, and field normalization.
//!
//! - [`service`] -- the lifecycle service (the single mutating entry point).
//! - [`store`] -- the persistence seam implemented by the database crate.
//! - [`memory`] -- an in-process [`store::SessionStore`] implementation.
//! - [`access`] -- the unified ownership / visibility capability check.
//! - [`transition`] -- draft/published transition classification and policy.

pub mod access;
pub mod memory;
pub mod service;
pub mod store;
pub mod transition;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{DbId, SessionId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum title length in characters, measured after trimming.
pub const MAX_TITLE_LEN: usize = 200;

/// Validation messages, one per violated field.
pub const MSG_TITLE_REQUIRED: &str = "Title is required";
pub const MSG_TITLE_TOO_LONG: &str = "Title cannot exceed 200 characters";
pub const MSG_RESOURCE_URL_REQUIRED: &str = "Resource URL is required";

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Status ID type matching the SMALLINT `session_statuses` lookup table.
pub type StatusId = i16;

/// Publication state of a session.
///
/// Discriminants match the seed order of the `session_statuses` table.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Draft = 1,
    Published = 2,
}

impl SessionStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Map a database status ID back to the enum.
    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            1 => Some(SessionStatus::Draft),
            2 => Some(SessionStatus::Published),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Draft => "draft",
            SessionStatus::Published => "published",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A user-authored session referencing an externally hosted JSON payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    pub owner: DbId,
    pub title: String,
    pub tags: Vec<String>,
    pub resource_url: String,
    pub status: SessionStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Body of `POST /sessions/save-draft` and `POST /sessions/publish`.
///
/// Every field is optional on the wire so that a missing field surfaces as a
/// validation detail instead of a deserialization rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Raw comma-separated tag text, parsed with [`parse_tags`].
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub resource_url: Option<String>,
}

/// Normalized, validated session fields ready to be written to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFields {
    pub title: String,
    pub tags: Vec<String>,
    pub resource_url: String,
}

impl SessionInput {
    /// Validate and normalize the editable fields.
    ///
    /// Collects every violation before failing so the caller can report all
    /// of them at once.
    pub fn validate(&self) -> CoreResult<SessionFields> {
        let title = self.title.as_deref().unwrap_or_default().trim();
        let resource_url = self.resource_url.as_deref().unwrap_or_default().trim();

        let mut details = Vec::new();
        if title.is_empty() {
            details.push(MSG_TITLE_REQUIRED.to_string());
        } else if title.chars().count() > MAX_TITLE_LEN {
            details.push(MSG_TITLE_TOO_LONG.to_string());
        }
        if resource_url.is_empty() {
            details.push(MSG_RESOURCE_URL_REQUIRED.to_string());
        }
        if !details.is_empty() {
            return Err(CoreError::Validation(details));
        }

        Ok(SessionFields {
            title: title.to_string(),
            tags: parse_tags(self.tags.as_deref().unwrap_or_default()),
            resource_url: resource_url.to_string(),
        })
    }

    /// The target record id, if any. Blank means "create a new session".
    pub fn target_id(&self) -> CoreResult<Option<SessionId>> {
        match self.session_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => parse_session_id(raw).map(Some),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Parse raw comma-separated tag text.
///
/// Pieces are trimmed and lower-cased; empty pieces are dropped. Order is
/// preserved and duplicates are kept.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Normalize a single tag used as a filter. Returns `None` for blank input.
pub fn normalize_tag(raw: &str) -> Option<String> {
    let tag = raw.trim();
    (!tag.is_empty()).then(|| tag.to_lowercase())
}

/// Parse a client-supplied session id.
pub fn parse_session_id(raw: &str) -> CoreResult<SessionId> {
    SessionId::parse_str(raw.trim())
        .map_err(|_| CoreError::BadRequest("Invalid session ID".to_string()))
}
