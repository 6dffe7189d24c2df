//! # Domain Errors
//!
//! Error types for the Session Controller.

use shared_types::GatewayError;
use thiserror::Error;

/// Session controller error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Backend rejected the credentials or the request; shown verbatim.
    #[error("{0}")]
    Auth(String),

    /// Operation requires a session and there is none.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Stored token was refused by the backend; the session has been ended.
    #[error("Session expired: {0}")]
    Expired(String),

    /// Backend unreachable.
    #[error("Network error: {0}")]
    Transport(String),

    /// Credentials could not be written; nothing was changed in memory.
    #[error("Credential store error: {0}")]
    Storage(String),
}

impl SessionError {
    /// Map a failure from an unauthenticated call (login, signup).
    ///
    /// A 401 there means bad credentials, not an expired session.
    pub fn from_credential_exchange(err: GatewayError) -> Self {
        match err {
            GatewayError::Rejected(m) | GatewayError::Unauthorized(m) => SessionError::Auth(m),
            GatewayError::NotFound(m)
            | GatewayError::Transport(m)
            | GatewayError::MalformedResponse(m) => SessionError::Transport(m),
        }
    }

    /// Map a failure from a call that carried the session token.
    pub fn from_authenticated_call(err: GatewayError) -> Self {
        match err {
            GatewayError::Unauthorized(m) => SessionError::Expired(m),
            other => Self::from_credential_exchange(other),
        }
    }
}

/// Credential store failure.
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    /// Underlying file operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored contents could not be parsed or are incomplete.
    #[error("Corrupt credentials: {0}")]
    Corrupt(String),

    /// Write refused by the store.
    #[error("Write rejected: {0}")]
    WriteRejected(String),
}
