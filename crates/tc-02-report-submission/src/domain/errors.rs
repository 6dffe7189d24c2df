//! # Domain Errors

use shared_types::GatewayError;
use thiserror::Error;

/// Report submission errors. All of them leave the draft in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Local check failed; nothing was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No session to submit under.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Backend refused the report; its message is shown verbatim.
    #[error("{0}")]
    Rejected(String),

    /// Backend unreachable.
    #[error("Network error: {0}")]
    Transport(String),

    /// Backend refused the session token.
    #[error("Session expired: {0}")]
    Expired(String),

    /// Backend answer did not make sense.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl SubmissionError {
    pub fn validation(message: impl Into<String>) -> Self {
        SubmissionError::Validation(message.into())
    }
}

impl From<GatewayError> for SubmissionError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Unauthorized(m) => SubmissionError::Expired(m),
            GatewayError::Rejected(m) | GatewayError::NotFound(m) => SubmissionError::Rejected(m),
            GatewayError::Transport(m) => SubmissionError::Transport(m),
            GatewayError::MalformedResponse(m) => SubmissionError::MalformedResponse(m),
        }
    }
}
