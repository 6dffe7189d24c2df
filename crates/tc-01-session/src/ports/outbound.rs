//! # Outbound Ports
//!
//! Traits for external dependencies (auth endpoints, durable storage).

use crate::domain::{AccountDetails, AuthGrant, CredentialStoreError, PersistedCredentials};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{AuthToken, GatewayError, UserProfile};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Auth endpoints - outbound port.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// `POST /api/auth/login`.
    async fn login(&self, identifier: &str, password: &str) -> Result<AuthGrant, GatewayError>;

    /// `POST /api/auth/signup`.
    async fn signup(
        &self,
        account: &AccountDetails,
        password: &str,
    ) -> Result<AuthGrant, GatewayError>;

    /// `PUT /api/auth/me`.
    async fn update_profile(
        &self,
        token: &AuthToken,
        update: &AccountDetails,
    ) -> Result<UserProfile, GatewayError>;

    /// `POST /api/auth/me/password`. Returns the backend's confirmation text.
    async fn change_password(
        &self,
        token: &AuthToken,
        old_password: &str,
        new_password: &str,
    ) -> Result<String, GatewayError>;
}

/// Durable key-value persistence of the session - outbound port.
///
/// The session controller is the only writer; writes are last-write-wins.
pub trait CredentialStore: Send + Sync {
    /// Read the persisted credentials, `None` if nothing is stored.
    fn load(&self) -> Result<Option<PersistedCredentials>, CredentialStoreError>;

    /// Replace the persisted credentials.
    fn save(&self, credentials: &PersistedCredentials) -> Result<(), CredentialStoreError>;

    /// Forget the persisted credentials. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), CredentialStoreError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock auth gateway for testing.
pub struct MockAuthGateway {
    /// Returned by `login` / `signup` when no failure is configured.
    pub grant: Option<AuthGrant>,
    /// Returned by every call when set.
    pub failure: Option<GatewayError>,
    /// Number of calls made, across all methods.
    pub calls: AtomicUsize,
    /// Token presented on the last authenticated call.
    pub last_token: Mutex<Option<AuthToken>>,
}

impl Default for MockAuthGateway {
    fn default() -> Self {
        Self {
            grant: None,
            failure: None,
            calls: AtomicUsize::new(0),
            last_token: Mutex::new(None),
        }
    }
}

impl MockAuthGateway {
    /// Gateway that grants this session to any credentials.
    pub fn granting(grant: AuthGrant) -> Self {
        Self {
            grant: Some(grant),
            ..Default::default()
        }
    }

    /// Gateway that fails every call.
    pub fn failing(failure: GatewayError) -> Self {
        Self {
            failure: Some(failure),
            ..Default::default()
        }
    }

    /// Calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<(), GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn issue(&self) -> Result<AuthGrant, GatewayError> {
        self.grant.clone().ok_or_else(|| {
            GatewayError::Unauthorized("Incorrect username, email, or phone".to_string())
        })
    }
}

#[async_trait]
impl AuthGateway for MockAuthGateway {
    async fn login(&self, _identifier: &str, _password: &str) -> Result<AuthGrant, GatewayError> {
        self.begin()?;
        self.issue()
    }

    async fn signup(
        &self,
        account: &AccountDetails,
        _password: &str,
    ) -> Result<AuthGrant, GatewayError> {
        self.begin()?;
        let mut grant = self.issue()?;
        grant.user.username = account.username.clone();
        grant.user.email = account.email.clone();
        grant.user.phone = account.phone.clone();
        Ok(grant)
    }

    async fn update_profile(
        &self,
        token: &AuthToken,
        update: &AccountDetails,
    ) -> Result<UserProfile, GatewayError> {
        self.begin()?;
        *self.last_token.lock() = Some(token.clone());
        let id = self
            .grant
            .as_ref()
            .map(|g| g.user.id.clone())
            .unwrap_or_else(|| "1".to_string());
        Ok(UserProfile {
            id,
            username: update.username.clone(),
            email: update.email.clone(),
            phone: update.phone.clone(),
        })
    }

    async fn change_password(
        &self,
        token: &AuthToken,
        _old_password: &str,
        _new_password: &str,
    ) -> Result<String, GatewayError> {
        self.begin()?;
        *self.last_token.lock() = Some(token.clone());
        Ok("Password updated successfully".to_string())
    }
}
