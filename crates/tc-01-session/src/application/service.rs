//! # Session Controller
//!
//! Application service owning the current session.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{AccountDetails, AuthGrant, PersistedCredentials, SessionError};
use crate::ports::{AuthGateway, CredentialStore, SessionApi};
use shared_types::{Session, SessionListener, UserProfile};

/// Session Controller - single writer of the credential store.
pub struct SessionController {
    /// Auth endpoints.
    gateway: Arc<dyn AuthGateway>,
    /// Durable credentials.
    store: Arc<dyn CredentialStore>,
    /// In-memory session.
    session: Option<Session>,
    /// Notified whenever a session ends.
    listeners: Vec<Arc<dyn SessionListener>>,
}

impl SessionController {
    /// Create a controller with no session. Call [`SessionApi::restore`] to
    /// adopt persisted credentials.
    pub fn new(gateway: Arc<dyn AuthGateway>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            gateway,
            store,
            session: None,
            listeners: Vec::new(),
        }
    }

    /// Register a listener for session end.
    pub fn add_listener(&mut self, listener: Arc<dyn SessionListener>) {
        self.listeners.push(listener);
    }

    /// Whether a session is present.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// End the session after the backend refused its token.
    pub fn handle_expired(&mut self) {
        if self.session.is_some() {
            warn!("[tc-01] Backend refused the session token, logging out");
        }
        self.logout();
    }

    /// Persist first, then adopt in memory.
    fn adopt(&mut self, session: Session) -> Result<Session, SessionError> {
        self.store
            .save(&PersistedCredentials::from(&session))
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        self.session = Some(session.clone());
        Ok(session)
    }

    fn adopt_grant(&mut self, grant: AuthGrant) -> Result<Session, SessionError> {
        if grant.access_token.is_blank() {
            return Err(SessionError::Auth("Backend issued an empty token".to_string()));
        }
        self.adopt(Session::new(grant.access_token, grant.user))
    }

    fn require_session(&self) -> Result<Session, SessionError> {
        self.session.clone().ok_or(SessionError::NotAuthenticated)
    }

    /// Map an authenticated-call failure, ending the session on expiry.
    fn fail_authenticated(&mut self, err: shared_types::GatewayError) -> SessionError {
        let err = SessionError::from_authenticated_call(err);
        if matches!(err, SessionError::Expired(_)) {
            self.handle_expired();
        }
        err
    }
}

#[async_trait]
impl SessionApi for SessionController {
    fn restore(&mut self) -> Option<Session> {
        let loaded = self
            .store
            .load()
            .and_then(|creds| creds.map(PersistedCredentials::into_session).transpose());

        match loaded {
            Ok(Some(session)) => {
                info!("[tc-01] Restored session for {}", session.user().username);
                self.session = Some(session.clone());
                Some(session)
            }
            Ok(None) => {
                debug!("[tc-01] No persisted session");
                None
            }
            Err(e) => {
                debug!("[tc-01] Discarding unreadable credentials: {}", e);
                if let Err(e) = self.store.clear() {
                    warn!("[tc-01] Failed to clear unreadable credentials: {}", e);
                }
                None
            }
        }
    }

    async fn login(&mut self, identifier: &str, password: &str) -> Result<Session, SessionError> {
        let grant = self
            .gateway
            .login(identifier, password)
            .await
            .map_err(SessionError::from_credential_exchange)?;
        let session = self.adopt_grant(grant)?;
        info!("[tc-01] Logged in as {}", session.user().username);
        Ok(session)
    }

    async fn signup(
        &mut self,
        account: &AccountDetails,
        password: &str,
    ) -> Result<Session, SessionError> {
        let grant = self
            .gateway
            .signup(account, password)
            .await
            .map_err(SessionError::from_credential_exchange)?;
        let session = self.adopt_grant(grant)?;
        info!("[tc-01] Signed up as {}", session.user().username);
        Ok(session)
    }

    fn logout(&mut self) {
        let had_session = self.session.take().is_some();
        for listener in &self.listeners {
            listener.on_session_ended();
        }
        if let Err(e) = self.store.clear() {
            warn!("[tc-01] Failed to clear persisted credentials: {}", e);
        }
        if had_session {
            info!("[tc-01] Logged out");
        }
    }

    async fn update_profile(
        &mut self,
        update: &AccountDetails,
    ) -> Result<UserProfile, SessionError> {
        let session = self.require_session()?;
        let profile = match self.gateway.update_profile(session.token(), update).await {
            Ok(profile) => profile,
            Err(e) => return Err(self.fail_authenticated(e)),
        };
        self.adopt(session.with_user(profile.clone()))?;
        info!("[tc-01] Profile updated for {}", profile.username);
        Ok(profile)
    }

    async fn change_password(
        &mut self,
        old_password: &str,
        new_password: &str,
    ) -> Result<String, SessionError> {
        let session = self.require_session()?;
        let message = match self
            .gateway
            .change_password(session.token(), old_password, new_password)
            .await
        {
            Ok(message) => message,
            Err(e) => return Err(self.fail_authenticated(e)),
        };
        info!("[tc-01] Password changed, ending session");
        self.logout();
        Ok(message)
    }

    fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}
