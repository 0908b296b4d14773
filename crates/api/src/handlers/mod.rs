//! Request handlers.
//!
//! Handlers delegate to the [`SessionService`](wellness_core::session::service::SessionService)
//! held in [`AppState`](crate::state::AppState) and map errors via
//! [`AppError`](crate::error::AppError).

pub mod session;
