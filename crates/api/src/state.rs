use std::sync::Arc;

use wellness_core::session::service::SessionService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Session lifecycle service over the configured store.
    pub sessions: SessionService,
    /// Server configuration (read by the auth extractor).
    pub config: Arc<ServerConfig>,
}
