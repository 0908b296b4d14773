//! Session row model.

use sqlx::FromRow;
use wellness_core::error::CoreError;
use wellness_core::session::{Session, SessionStatus, StatusId};
use wellness_core::types::{DbId, SessionId, Timestamp};

/// A row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub id: SessionId,
    pub owner_id: DbId,
    pub title: String,
    pub tags: Vec<String>,
    pub resource_url: String,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<SessionRow> for Session {
    type Error = CoreError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        let status = SessionStatus::from_id(row.status_id).ok_or_else(|| {
            CoreError::Internal(format!(
                "session {} has unknown status_id {}",
                row.id, row.status_id
            ))
        })?;
        Ok(Session {
            id: row.id,
            owner: row.owner_id,
            title: row.title,
            tags: row.tags,
            resource_url: row.resource_url,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
