/// Subject identifiers issued by the identity provider are BIGINT user ids.
pub type DbId = i64;

/// Session identifiers are UUID v7 (time ordered, opaque to clients).
pub type SessionId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
