//! Session lifecycle service.
//!
//! [`SessionService::upsert`] is the only code path that writes a session's
//! status. "Save draft" and "publish" are the same operation with a different
//! target state.

use std::sync::Arc;

use super::access::Access;
use super::store::SessionStore;
use super::transition::{Transition, TransitionPolicy};
use super::{normalize_tag, Session, SessionInput, SessionStatus};
use crate::error::{CoreError, CoreResult};
use crate::types::{DbId, SessionId};

/// Single authority for creating, reading, and transitioning sessions.
///
/// Cheaply cloneable; the store is shared behind an `Arc`.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    policy: TransitionPolicy,
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>, policy: TransitionPolicy) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// All published sessions, newest first. A blank `tag` means no filter.
    pub async fn list_published(&self, tag: Option<&str>) -> CoreResult<Vec<Session>> {
        let tag = tag.and_then(normalize_tag);
        self.store.list_published(tag.as_deref()).await
    }

    /// Every session owned by `owner` (draft and published), most recently
    /// updated first.
    pub async fn list_owned(&self, owner: DbId) -> CoreResult<Vec<Session>> {
        self.store.list_by_owner(owner).await
    }

    /// A session the caller owns, in any state.
    pub async fn get_owned(&self, owner: DbId, id: SessionId) -> CoreResult<Session> {
        self.find_with(owner, id, Access::can_write).await
    }

    /// A session the caller owns, or any published session.
    pub async fn get_visible(&self, subject: DbId, id: SessionId) -> CoreResult<Session> {
        self.find_with(subject, id, Access::can_read).await
    }

    /// Create or update a session and move it to `target`.
    ///
    /// With an id in `input` the record must exist and belong to `owner`;
    /// otherwise it fails with `NotFound` and nothing is written. Without an
    /// id a new session is created.
    pub async fn upsert(
        &self,
        owner: DbId,
        input: &SessionInput,
        target: SessionStatus,
    ) -> CoreResult<Session> {
        let fields = input.validate()?;
        let target_id = input.target_id()?;

        let Some(id) = target_id else {
            self.policy.check(Transition::classify(None, target))?;
            let session = self.store.insert(owner, &fields, target).await?;
            tracing::info!(
                session_id = %session.id,
                owner,
                status = %session.status,
                "Session created",
            );
            return Ok(session);
        };

        let current = self.get_owned(owner, id).await?;
        let transition = Transition::classify(Some(current.status), target);
        self.policy.check(transition)?;
        if transition == Transition::Unpublish {
            tracing::warn!(session_id = %id, owner, "Published session saved back to draft");
        }

        let expected = self.policy.guards(target).then_some(current.status);
        let Some(session) = self
            .store
            .update_owned(id, owner, &fields, target, expected)
            .await?
        else {
            return Err(self.write_skipped(owner, id, target).await);
        };
        tracing::info!(
            session_id = %session.id,
            owner,
            status = %session.status,
            "Session updated",
        );
        Ok(session)
    }

    /// Upsert with `target = draft`.
    pub async fn save_draft(&self, owner: DbId, input: &SessionInput) -> CoreResult<Session> {
        self.upsert(owner, input, SessionStatus::Draft).await
    }

    /// Upsert with `target = published`.
    pub async fn publish(&self, owner: DbId, input: &SessionInput) -> CoreResult<Session> {
        self.upsert(owner, input, SessionStatus::Published).await
    }

    /// Explain why a guarded update matched no row: the record is gone, or
    /// its status changed since the policy check.
    async fn write_skipped(&self, owner: DbId, id: SessionId, target: SessionStatus) -> CoreError {
        let latest = match self.get_owned(owner, id).await {
            Ok(latest) => latest,
            Err(e) => return e,
        };
        tracing::warn!(
            session_id = %id,
            owner,
            status = %latest.status,
            "Session status changed during save",
        );
        match self
            .policy
            .check(Transition::classify(Some(latest.status), target))
        {
            Err(e) => e,
            Ok(()) => CoreError::Conflict("Session was modified concurrently".to_string()),
        }
    }

    async fn find_with(
        &self,
        subject: DbId,
        id: SessionId,
        allowed: fn(Access) -> bool,
    ) -> CoreResult<Session> {
        self.store
            .find_by_id(id)
            .await?
            .filter(|session| allowed(Access::resolve(subject, session)))
            .ok_or_else(|| CoreError::session_not_found(id))
    }
}
