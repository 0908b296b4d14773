//! Client side of the session editor.
//!
//! - [`form`] -- local form state and client-side validation.
//! - [`api`] -- the [`api::SessionApi`] seam and its reqwest implementation.
//! - [`autosave`] -- debounce slot and the auto-save status indicator.
//! - [`editor`] -- [`editor::SessionEditor`], which ties them together.

pub mod api;
pub mod autosave;
pub mod editor;
pub mod error;
pub mod form;
