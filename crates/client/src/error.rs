use crate::form::FormErrors;

/// Errors surfaced by the session editor and the HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Client-side validation failed; no request was sent.
    #[error("Invalid form: {0}")]
    Invalid(FormErrors),

    /// The server rejected the request (400, 409, 5xx).
    #[error("Request rejected ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the response body.
        message: String,
        /// Per-field validation messages, empty for non-validation errors.
        details: Vec<String>,
    },

    /// The session does not exist or belongs to someone else.
    #[error("Session not found")]
    NotFound,

    /// Missing, invalid or expired bearer token.
    #[error("Unauthorized")]
    Unauthorized,

    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
