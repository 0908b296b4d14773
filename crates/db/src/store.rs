//! [`SessionStore`] backed by PostgreSQL.

use async_trait::async_trait;
use wellness_core::error::{CoreError, CoreResult};
use wellness_core::session::store::SessionStore;
use wellness_core::session::{Session, SessionFields, SessionStatus};
use wellness_core::types::{DbId, SessionId};

use crate::models::session::SessionRow;
use crate::repositories::SessionRepo;
use crate::DbPool;

/// Session store that delegates to [`SessionRepo`].
#[derive(Clone)]
pub struct PgSessionStore {
    pool: DbPool,
}

impl PgSessionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Log a database failure and collapse it into an opaque internal error.
fn db_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Session store query failed");
    CoreError::Internal(err.to_string())
}

fn into_sessions(rows: Vec<SessionRow>) -> CoreResult<Vec<Session>> {
    rows.into_iter().map(Session::try_from).collect()
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn list_published(&self, tag: Option<&str>) -> CoreResult<Vec<Session>> {
        let rows = SessionRepo::list_by_status(&self.pool, SessionStatus::Published, tag)
            .await
            .map_err(db_error)?;
        into_sessions(rows)
    }

    async fn list_by_owner(&self, owner: DbId) -> CoreResult<Vec<Session>> {
        let rows = SessionRepo::list_by_owner(&self.pool, owner)
            .await
            .map_err(db_error)?;
        into_sessions(rows)
    }

    async fn find_by_id(&self, id: SessionId) -> CoreResult<Option<Session>> {
        SessionRepo::find_by_id(&self.pool, id)
            .await
            .map_err(db_error)?
            .map(Session::try_from)
            .transpose()
    }

    async fn insert(
        &self,
        owner: DbId,
        fields: &SessionFields,
        status: SessionStatus,
    ) -> CoreResult<Session> {
        let row = SessionRepo::create(&self.pool, SessionId::now_v7(), owner, fields, status)
            .await
            .map_err(db_error)?;
        Session::try_from(row)
    }

    async fn update_owned(
        &self,
        id: SessionId,
        owner: DbId,
        fields: &SessionFields,
        status: SessionStatus,
        expected: Option<SessionStatus>,
    ) -> CoreResult<Option<Session>> {
        SessionRepo::update_owned(&self.pool, id, owner, fields, status, expected)
            .await
            .map_err(db_error)?
            .map(Session::try_from)
            .transpose()
    }

    async fn health_check(&self) -> CoreResult<()> {
        crate::health_check(&self.pool).await.map_err(db_error)
    }
}
