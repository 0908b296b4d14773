//! In-process [`SessionStore`] backed by a `RwLock<HashMap>`.
//!
//! Used by the test suites and by the API server when no `DATABASE_URL` is
//! configured. Contents are lost when the process exits.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use super::store::SessionStore;
use super::{Session, SessionFields, SessionStatus};
use crate::error::CoreResult;
use crate::types::{DbId, SessionId, Timestamp};

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, regardless of owner or status.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// `now`, nudged forward so it is strictly after `previous`.
fn next_timestamp(previous: Timestamp) -> Timestamp {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn list_published(&self, tag: Option<&str>) -> CoreResult<Vec<Session>> {
        let sessions = self.sessions.read().await;
        let mut published: Vec<Session> = sessions
            .values()
            .filter(|s| s.status == SessionStatus::Published)
            .filter(|s| tag.map_or(true, |t| s.tags.iter().any(|have| have == t)))
            .cloned()
            .collect();
        published.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(published)
    }

    async fn list_by_owner(&self, owner: DbId) -> CoreResult<Vec<Session>> {
        let sessions = self.sessions.read().await;
        let mut owned: Vec<Session> = sessions
            .values()
            .filter(|s| s.owner == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(owned)
    }

    async fn find_by_id(&self, id: SessionId) -> CoreResult<Option<Session>> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn insert(
        &self,
        owner: DbId,
        fields: &SessionFields,
        status: SessionStatus,
    ) -> CoreResult<Session> {
        let now = Utc::now();
        let session = Session {
            id: SessionId::now_v7(),
            owner,
            title: fields.title.clone(),
            tags: fields.tags.clone(),
            resource_url: fields.resource_url.clone(),
            status,
            created_at: now,
            updated_at: now,
        };
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        Ok(session)
    }

    async fn update_owned(
        &self,
        id: SessionId,
        owner: DbId,
        fields: &SessionFields,
        status: SessionStatus,
        expected: Option<SessionStatus>,
    ) -> CoreResult<Option<Session>> {
        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions
            .get_mut(&id)
            .filter(|s| s.owner == owner)
            .filter(|s| expected.map_or(true, |e| s.status == e))
        else {
            return Ok(None);
        };
        session.title = fields.title.clone();
        session.tags = fields.tags.clone();
        session.resource_url = fields.resource_url.clone();
        session.status = status;
        session.updated_at = next_timestamp(session.updated_at);
        Ok(Some(session.clone()))
    }

    async fn health_check(&self) -> CoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, tags: &[&str]) -> SessionFields {
        SessionFields {
            title: title.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            resource_url: "https://x.test/a.json".to_string(),
        }
    }

    #[tokio::test]
    async fn test_update_requires_matching_owner() {
        let store = MemorySessionStore::new();
        let created = store
            .insert(1, &fields("a", &[]), SessionStatus::Draft)
            .await
            .unwrap();

        let other = store
            .update_owned(created.id, 2, &fields("b", &[]), SessionStatus::Published, None)
            .await
            .unwrap();
        assert!(other.is_none());

        let unchanged = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(unchanged, created);
    }

    #[tokio::test]
    async fn test_update_strictly_advances_updated_at() {
        let store = MemorySessionStore::new();
        let created = store
            .insert(1, &fields("a", &[]), SessionStatus::Draft)
            .await
            .unwrap();

        let mut last = created.updated_at;
        for _ in 0..5 {
            let updated = store
                .update_owned(created.id, 1, &fields("a", &[]), SessionStatus::Draft, None)
                .await
                .unwrap()
                .unwrap();
            assert!(updated.updated_at > last);
            assert_eq!(updated.created_at, created.created_at);
            last = updated.updated_at;
        }
    }

    #[tokio::test]
    async fn test_update_with_stale_expected_status_is_skipped() {
        let store = MemorySessionStore::new();
        let created = store
            .insert(1, &fields("a", &[]), SessionStatus::Published)
            .await
            .unwrap();

        let stale = store
            .update_owned(
                created.id,
                1,
                &fields("b", &[]),
                SessionStatus::Draft,
                Some(SessionStatus::Draft),
            )
            .await
            .unwrap();
        assert!(stale.is_none());
        let unchanged = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(unchanged, created);

        let current = store
            .update_owned(
                created.id,
                1,
                &fields("b", &[]),
                SessionStatus::Published,
                Some(SessionStatus::Published),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.title, "b");
    }

    #[tokio::test]
    async fn test_tag_filter_is_exact() {
        let store = MemorySessionStore::new();
        store
            .insert(1, &fields("yoga", &["yoga", "morning"]), SessionStatus::Published)
            .await
            .unwrap();
        store
            .insert(1, &fields("yogi", &["yogi"]), SessionStatus::Published)
            .await
            .unwrap();

        let hits = store.list_published(Some("yoga")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "yoga");

        assert_eq!(store.list_published(None).await.unwrap().len(), 2);
        assert!(store.list_published(Some("yo")).await.unwrap().is_empty());
    }
}
