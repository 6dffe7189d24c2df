//! # Error Types
//!
//! Errors returned by every outbound gateway port. Subsystems map these into
//! their own error enums.

use thiserror::Error;

/// Failure talking to the Tether backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Backend refused the request and explained why (`{"detail": ...}`).
    ///
    /// The message is shown to the user verbatim.
    #[error("{0}")]
    Rejected(String),

    /// Backend answered 401: credentials wrong or token no longer valid.
    #[error("{0}")]
    Unauthorized(String),

    /// Addressed resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend unreachable or the connection failed mid-request.
    #[error("Network error: {0}")]
    Transport(String),

    /// Backend answered with a body the client cannot interpret.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl GatewayError {
    /// True for a 401 answer.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Unauthorized(_))
    }

    /// The bare message, without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            GatewayError::Rejected(m)
            | GatewayError::Unauthorized(m)
            | GatewayError::NotFound(m)
            | GatewayError::Transport(m)
            | GatewayError::MalformedResponse(m) => m,
        }
    }
}
