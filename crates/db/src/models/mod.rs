//! Row structs for the session tables.
//!
//! Each row struct derives `FromRow` and converts into the matching
//! `wellness_core` domain type.

pub mod session;
