#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Record absent, or owned by someone else. The two are deliberately
    /// indistinguishable to callers.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// One message per violated field, in field order.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience alias for results carrying a [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Build a `NotFound` for a session id.
    pub fn session_not_found(id: impl ToString) -> Self {
        CoreError::NotFound {
            entity: "Session",
            id: id.to_string(),
        }
    }
}
