//! Draft/published state machine.
//!
//! [`Transition::classify`] names the status change an upsert would make and
//! [`TransitionPolicy`] decides whether it is allowed. Keeping both out of the
//! upsert path means a stricter policy only touches this module.

use super::SessionStatus;
use crate::error::{CoreError, CoreResult};

/// The status change performed by one upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// No prior record; the session starts in the target state.
    Create(SessionStatus),
    /// Status unchanged (draft -> draft, published -> published).
    Keep(SessionStatus),
    /// draft -> published.
    Publish,
    /// published -> draft.
    Unpublish,
}

impl Transition {
    pub fn classify(current: Option<SessionStatus>, target: SessionStatus) -> Self {
        match (current, target) {
            (None, target) => Transition::Create(target),
            (Some(SessionStatus::Draft), SessionStatus::Published) => Transition::Publish,
            (Some(SessionStatus::Published), SessionStatus::Draft) => Transition::Unpublish,
            (Some(_), target) => Transition::Keep(target),
        }
    }
}

/// Which transitions the lifecycle service permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPolicy {
    /// Whether a published session may be saved back to draft.
    pub allow_unpublish: bool,
}

impl Default for TransitionPolicy {
    fn default() -> Self {
        Self {
            allow_unpublish: true,
        }
    }
}

impl TransitionPolicy {
    pub fn check(&self, transition: Transition) -> CoreResult<()> {
        match transition {
            Transition::Unpublish if !self.allow_unpublish => Err(CoreError::Conflict(
                "Published sessions cannot be saved back to draft".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Whether a write to `target` depends on the prior status, so the store
    /// must confirm the status it was checked against.
    pub fn guards(&self, target: SessionStatus) -> bool {
        [SessionStatus::Draft, SessionStatus::Published]
            .into_iter()
            .any(|from| self.check(Transition::classify(Some(from), target)).is_err())
    }
}
