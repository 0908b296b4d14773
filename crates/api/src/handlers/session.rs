//! Handlers for the `/sessions` resource.
//!
//! Every route requires authentication. Draft visibility and ownership are
//! enforced by the lifecycle service, never here.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use wellness_core::session::{parse_session_id, SessionInput};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PublishedSessionParams;
use crate::response::{SessionListResponse, SessionResponse, SessionSavedResponse};
use crate::state::AppState;

/// GET /api/v1/sessions
///
/// Published sessions from every owner, newest first. Supports `?tag=`.
pub async fn list_published(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PublishedSessionParams>,
) -> AppResult<Json<SessionListResponse>> {
    let sessions = state.sessions.list_published(params.tag.as_deref()).await?;
    Ok(Json(sessions.into()))
}

/// GET /api/v1/sessions/mine
pub async fn list_mine(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<SessionListResponse>> {
    let sessions = state.sessions.list_owned(user.user_id).await?;
    Ok(Json(sessions.into()))
}

/// GET /api/v1/sessions/mine/{id}
pub async fn get_mine(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<SessionResponse>> {
    let id = parse_session_id(&id)?;
    let session = state.sessions.get_owned(user.user_id, id).await?;
    Ok(Json(SessionResponse { session }))
}

/// GET /api/v1/sessions/{id}
///
/// A session the caller owns, or any published session.
pub async fn get_visible(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<SessionResponse>> {
    let id = parse_session_id(&id)?;
    let session = state.sessions.get_visible(user.user_id, id).await?;
    Ok(Json(SessionResponse { session }))
}

/// POST /api/v1/sessions/save-draft
pub async fn save_draft(
    user: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<SessionInput>, JsonRejection>,
) -> AppResult<Json<SessionSavedResponse>> {
    let Json(input) = payload?;
    let session = state.sessions.save_draft(user.user_id, &input).await?;
    Ok(Json(SessionSavedResponse {
        message: "Draft saved successfully",
        session,
    }))
}

/// POST /api/v1/sessions/publish
pub async fn publish(
    user: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<SessionInput>, JsonRejection>,
) -> AppResult<Json<SessionSavedResponse>> {
    let Json(input) = payload?;
    let session = state.sessions.publish(user.user_id, &input).await?;
    Ok(Json(SessionSavedResponse {
        message: "Session published successfully",
        session,
    }))
}
