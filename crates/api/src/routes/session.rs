//! Route definitions for the `/sessions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// Routes mounted at `/sessions`.
///
/// ```text
/// GET    /                 -> list_published
/// GET    /mine             -> list_mine
/// GET    /mine/{id}        -> get_mine
/// POST   /save-draft       -> save_draft
/// POST   /publish          -> publish
/// GET    /{id}             -> get_visible
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(session::list_published))
        .route("/mine", get(session::list_mine))
        .route("/mine/{id}", get(session::get_mine))
        .route("/save-draft", post(session::save_draft))
        .route("/publish", post(session::publish))
        .route("/{id}", get(session::get_visible))
}
