//! # Domain Errors

use shared_types::{GatewayError, MatchDecision, SubmissionId};
use thiserror::Error;

/// Match lifecycle errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// `load_match` was called without a usable id; nothing was fetched.
    #[error("Missing submission id")]
    MissingSubmissionId,

    #[error("Match not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Transport(String),

    /// Backend refused the session token.
    #[error("Session expired: {0}")]
    Expired(String),

    /// Backend refused the request with a message.
    #[error("{0}")]
    Rejected(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A confirm/reject call failed after the local transition. Logged only.
    #[error("Best-effort {decision:?} for submission {submission_id} failed: {reason}")]
    BestEffort {
        decision: MatchDecision,
        submission_id: SubmissionId,
        reason: String,
    },
}

impl From<GatewayError> for MatchError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotFound(m) => MatchError::NotFound(m),
            GatewayError::Transport(m) => MatchError::Transport(m),
            GatewayError::Unauthorized(m) => MatchError::Expired(m),
            GatewayError::Rejected(m) => MatchError::Rejected(m),
            GatewayError::MalformedResponse(m) => MatchError::MalformedResponse(m),
        }
    }
}
