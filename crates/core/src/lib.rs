//! Domain types and the session lifecycle for the wellness session service.
//!
//! This crate has no database or HTTP dependencies so the API server, the
//! PostgreSQL store, and the auto-save client can all share the same
//! session model, validation rules, and error taxonomy.

pub mod error;
pub mod session;
pub mod types;
