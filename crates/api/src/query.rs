//! Query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for `GET /sessions` (`?tag=`).
///
/// The tag is normalized (trimmed, lower-cased) by the lifecycle service;
/// a blank value means no filter.
#[derive(Debug, Default, Deserialize)]
pub struct PublishedSessionParams {
    pub tag: Option<String>,
}
