//! Repository for the `sessions` table.

use sqlx::PgPool;
use wellness_core::session::{SessionFields, SessionStatus};
use wellness_core::types::{DbId, SessionId};

use crate::models::session::SessionRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, owner_id, title, tags, resource_url, status_id, created_at, updated_at";

/// Provides data access for sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session with a caller-assigned id, returning the row.
    pub async fn create(
        pool: &PgPool,
        id: SessionId,
        owner_id: DbId,
        fields: &SessionFields,
        status: SessionStatus,
    ) -> Result<SessionRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (id, owner_id, title, tags, resource_url, status_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&fields.title)
            .bind(&fields.tags)
            .bind(&fields.resource_url)
            .bind(status.id())
            .fetch_one(pool)
            .await
    }

    /// Find a session by id regardless of owner.
    pub async fn find_by_id(pool: &PgPool, id: SessionId) -> Result<Option<SessionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE id = $1");
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List sessions in `status`, newest first, optionally restricted to rows
    /// whose `tags` array contains `tag`.
    pub async fn list_by_status(
        pool: &PgPool,
        status: SessionStatus,
        tag: Option<&str>,
    ) -> Result<Vec<SessionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE status_id = $1 AND ($2::TEXT IS NULL OR $2 = ANY(tags))
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(status.id())
            .bind(tag)
            .fetch_all(pool)
            .await
    }

    /// List every session of an owner, most recently updated first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<SessionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE owner_id = $1
             ORDER BY updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite the editable columns of `(id, owner_id)`.
    ///
    /// `updated_at` is forced strictly forward even when two writes land in
    /// the same transaction timestamp. With `expected` set, the row must
    /// still carry that status. Returns `None` if no row matches.
    pub async fn update_owned(
        pool: &PgPool,
        id: SessionId,
        owner_id: DbId,
        fields: &SessionFields,
        status: SessionStatus,
        expected: Option<SessionStatus>,
    ) -> Result<Option<SessionRow>, sqlx::Error> {
        let query = format!(
            "UPDATE sessions SET
                title = $3,
                tags = $4,
                resource_url = $5,
                status_id = $6,
                updated_at = GREATEST(now(), updated_at + INTERVAL '1 microsecond')
             WHERE id = $1 AND owner_id = $2
               AND ($7::SMALLINT IS NULL OR status_id = $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&fields.title)
            .bind(&fields.tags)
            .bind(&fields.resource_url)
            .bind(status.id())
            .bind(expected.map(SessionStatus::id))
            .fetch_optional(pool)
            .await
    }
}
