//! Editable form state held by the client.

use std::fmt;

use wellness_core::session::{Session, SessionInput};
use wellness_core::types::SessionId;

pub const MSG_TITLE_REQUIRED: &str = "Title is required";
pub const MSG_URL_REQUIRED: &str = "Resource URL is required";
pub const MSG_URL_INVALID: &str = "Please enter a valid URL";

/// The three user-editable fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionForm {
    pub title: String,
    /// Raw comma-separated tag text.
    pub tags: String,
    pub resource_url: String,
}

/// Per-field client-side validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub title: Option<&'static str>,
    pub resource_url: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.resource_url.is_none()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = [self.title, self.resource_url]
            .into_iter()
            .flatten()
            .collect();
        f.write_str(&messages.join("; "))
    }
}

impl SessionForm {
    /// Populate a form from a stored session. Tags are joined with `", "`.
    pub fn from_session(session: &Session) -> Self {
        Self {
            title: session.title.clone(),
            tags: session.tags.join(", "),
            resource_url: session.resource_url.clone(),
        }
    }

    /// Whether an auto-save may be attempted: title and URL are non-blank.
    pub fn can_auto_save(&self) -> bool {
        !self.title.trim().is_empty() && !self.resource_url.trim().is_empty()
    }

    /// Validation run before a manual save or publish.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        if self.title.trim().is_empty() {
            errors.title = Some(MSG_TITLE_REQUIRED);
        }

        let url = self.resource_url.trim();
        if url.is_empty() {
            errors.resource_url = Some(MSG_URL_REQUIRED);
        } else if !url.starts_with("http") {
            errors.resource_url = Some(MSG_URL_INVALID);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Request body for an upsert targeting `session_id` (create when `None`).
    pub fn to_input(&self, session_id: Option<SessionId>) -> SessionInput {
        SessionInput {
            session_id: session_id.map(|id| id.to_string()),
            title: Some(self.title.clone()),
            tags: Some(self.tags.clone()),
            resource_url: Some(self.resource_url.clone()),
        }
    }
}
