//! # Domain Entities
//!
//! Values exchanged with the auth endpoints and the credential store.

use super::errors::CredentialStoreError;
use serde::{Deserialize, Serialize};
use shared_types::{AuthToken, Session, UserProfile};

/// Account fields sent on signup and on profile update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDetails {
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
}

/// Successful answer of `login` / `signup`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthGrant {
    /// Bearer token for later calls.
    pub access_token: AuthToken,
    /// Always `"bearer"` for this backend.
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Profile of the authenticated user.
    pub user: UserProfile,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl AuthGrant {
    /// Grant with the default token type.
    pub fn new(access_token: AuthToken, user: UserProfile) -> Self {
        Self {
            access_token,
            token_type: default_token_type(),
            user,
        }
    }
}

/// The persisted form of a session.
///
/// Both fields are mandatory, so a store holding only one of them fails to
/// parse and is treated as corrupt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedCredentials {
    /// Bearer token.
    pub token: AuthToken,
    /// Last-known profile.
    pub user: UserProfile,
}

impl PersistedCredentials {
    /// Turn stored credentials back into a session.
    ///
    /// # Errors
    /// - `Corrupt` if the stored token is blank
    pub fn into_session(self) -> Result<Session, CredentialStoreError> {
        if self.token.is_blank() {
            return Err(CredentialStoreError::Corrupt("blank token".to_string()));
        }
        Ok(Session::new(self.token, self.user))
    }
}

impl From<&Session> for PersistedCredentials {
    fn from(session: &Session) -> Self {
        Self {
            token: session.token().clone(),
            user: session.user().clone(),
        }
    }
}
