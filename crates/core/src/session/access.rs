//! Unified ownership / visibility check.
//!
//! Every read and write path resolves a subject's capability on a session
//! through [`Access::resolve`] so the rules live in one place.

use super::{Session, SessionStatus};
use crate::types::DbId;

/// What a subject may do with a particular session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The subject owns the session: full read and write.
    Owner,
    /// The session is published and owned by someone else: read only.
    PublishedReader,
    /// The subject may not see the session at all.
    None,
}

impl Access {
    pub fn resolve(subject: DbId, session: &Session) -> Self {
        if session.owner == subject {
            Access::Owner
        } else if session.status == SessionStatus::Published {
            Access::PublishedReader
        } else {
            Access::None
        }
    }

    pub fn can_read(self) -> bool {
        matches!(self, Access::Owner | Access::PublishedReader)
    }

    pub fn can_write(self) -> bool {
        self == Access::Owner
    }
}
