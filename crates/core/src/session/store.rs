//! Persistence seam for sessions.
//!
//! The lifecycle service talks to storage only through [`SessionStore`].
//! `wellness-db` implements it on PostgreSQL; [`super::memory`] implements it
//! in process for tests and database-less development.

use async_trait::async_trait;

use super::{Session, SessionFields, SessionStatus};
use crate::error::CoreResult;
use crate::types::{DbId, SessionId};

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Published sessions, newest `created_at` first, optionally restricted
    /// to those carrying `tag` exactly.
    async fn list_published(&self, tag: Option<&str>) -> CoreResult<Vec<Session>>;

    /// Every session owned by `owner`, newest `updated_at` first.
    async fn list_by_owner(&self, owner: DbId) -> CoreResult<Vec<Session>>;

    async fn find_by_id(&self, id: SessionId) -> CoreResult<Option<Session>>;

    /// Create a session with a freshly assigned id.
    async fn insert(
        &self,
        owner: DbId,
        fields: &SessionFields,
        status: SessionStatus,
    ) -> CoreResult<Session>;

    /// Overwrite the editable fields and status of `(id, owner)`.
    ///
    /// With `expected` set, the write only happens if the stored status still
    /// equals it. Returns `None` when no row matches the id, the owner and
    /// the expected status. The match and the write must be a single atomic
    /// step and must leave `updated_at` strictly greater than before.
    async fn update_owned(
        &self,
        id: SessionId,
        owner: DbId,
        fields: &SessionFields,
        status: SessionStatus,
        expected: Option<SessionStatus>,
    ) -> CoreResult<Option<Session>>;

    /// Verify the backing storage is reachable.
    async fn health_check(&self) -> CoreResult<()>;
}
