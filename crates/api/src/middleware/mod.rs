//! Request extractors enforcing authentication.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated subject from a JWT Bearer token.

pub mod auth;
