//! # Inbound Ports
//!
//! API trait defining what the Session Controller can do.

use crate::domain::{AccountDetails, SessionError};
use async_trait::async_trait;
use shared_types::{Session, UserProfile};

/// Session Controller API - inbound port.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Adopt persisted credentials without contacting the backend.
    ///
    /// Empty or unreadable storage yields `None`; this is never an error.
    fn restore(&mut self) -> Option<Session>;

    /// Exchange identifier (username, email or phone) and password for a session.
    async fn login(&mut self, identifier: &str, password: &str) -> Result<Session, SessionError>;

    /// Create an account and start a session for it.
    async fn signup(
        &mut self,
        account: &AccountDetails,
        password: &str,
    ) -> Result<Session, SessionError>;

    /// End the session and forget the persisted credentials.
    fn logout(&mut self);

    /// Replace the profile with the backend's answer to an update.
    async fn update_profile(
        &mut self,
        update: &AccountDetails,
    ) -> Result<UserProfile, SessionError>;

    /// Change the password; a successful change ends the session.
    async fn change_password(
        &mut self,
        old_password: &str,
        new_password: &str,
    ) -> Result<String, SessionError>;

    /// Current session, if any.
    fn current(&self) -> Option<&Session>;
}
