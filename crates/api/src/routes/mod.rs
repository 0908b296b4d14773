pub mod health;
pub mod session;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /sessions                         published sessions (?tag=)
/// /sessions/mine                    caller's sessions (draft + published)
/// /sessions/mine/{id}               one of the caller's sessions
/// /sessions/save-draft              upsert as draft (POST)
/// /sessions/publish                 upsert as published (POST)
/// /sessions/{id}                    owned or published session
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/sessions", session::router())
}
