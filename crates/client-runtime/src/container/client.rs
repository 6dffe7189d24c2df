//! # Tether Client
//!
//! Holds one instance of every subsystem and routes results between them.
//!
//! ## Startup Sequence
//!
//! 1. Restore the persisted session (no backend call)
//! 2. If a session exists, fetch the confirmed-match status and seed the
//!    match lifecycle controller
//! 3. Resolve the screen
//!
//! A backend `401` on any authenticated call ends the session through the
//! session controller's logout path, which also resets the lifecycle.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{info, warn};

use crate::adapters::HttpGateway;
use crate::container::ClientConfig;
use shared_types::{
    ConfirmedMatchMarker, GatewayError, MatchPhase, NavigationSignal, Session, SubmissionId,
    UserProfile,
};
use tc_01_session::{
    AccountDetails, AuthGateway, CredentialStore, FileCredentialStore, SessionApi,
    SessionController, SessionError,
};
use tc_02_report_submission::{
    ReportDraft, ReportGateway, ReportSubmissionApi, ReportSubmissionFlow, SubmissionError,
    SubmissionOutcome,
};
use tc_03_match_lifecycle::{
    LifecycleState, MatchError, MatchGateway, MatchLifecycleApi, MatchLifecycleConfig,
    MatchLifecycleController, Transition,
};
use tc_04_view_router::{NavigationIntent, RouterInput, Screen, ViewRouter};

/// Errors surfaced to the front end.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// The wired client.
pub struct TetherClient {
    session: SessionController,
    reports: ReportSubmissionFlow,
    lifecycle: MatchLifecycleController,
    router: ViewRouter,
    signals: broadcast::Receiver<NavigationSignal>,
}

impl TetherClient {
    /// Wire the subsystems over explicit ports.
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        reports: Arc<dyn ReportGateway>,
        matches: Arc<dyn MatchGateway>,
        store: Arc<dyn CredentialStore>,
        lifecycle_config: MatchLifecycleConfig,
    ) -> Self {
        let lifecycle = MatchLifecycleController::new(matches, lifecycle_config);
        let mut session = SessionController::new(auth, store);
        session.add_listener(Arc::new(lifecycle.clone()));
        let signals = lifecycle.subscribe();

        Self {
            session,
            reports: ReportSubmissionFlow::new(reports),
            lifecycle,
            router: ViewRouter::new(),
            signals,
        }
    }

    /// Wire against the HTTP backend and the file credential store.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let gateway = Arc::new(HttpGateway::new(&config.api)?);
        let store = Arc::new(FileCredentialStore::new(&config.storage.data_dir));
        Ok(Self::new(
            gateway.clone(),
            gateway.clone(),
            gateway,
            store,
            config.lifecycle.clone(),
        ))
    }

    // =========================================================================
    // Startup / session
    // =========================================================================

    /// Restore the session and any confirmed match, then resolve the screen.
    pub async fn start(&mut self) -> Screen {
        if let Some(session) = self.session.restore() {
            self.sync_status(&session).await;
        }
        self.refresh()
    }

    pub async fn login(&mut self, identifier: &str, password: &str) -> Result<Session, ClientError> {
        let session = self.session.login(identifier, password).await?;
        self.sync_status(&session).await;
        Ok(session)
    }

    pub async fn signup(
        &mut self,
        account: &AccountDetails,
        password: &str,
    ) -> Result<Session, ClientError> {
        let session = self.session.signup(account, password).await?;
        self.sync_status(&session).await;
        Ok(session)
    }

    /// End the session. The lifecycle is reset by the session listener.
    pub fn logout(&mut self) {
        self.session.logout();
        self.navigate(NavigationIntent::Home);
    }

    pub async fn update_profile(
        &mut self,
        update: &AccountDetails,
    ) -> Result<UserProfile, ClientError> {
        Ok(self.session.update_profile(update).await?)
    }

    /// Change the password. Success ends the session.
    pub async fn change_password(
        &mut self,
        old_password: &str,
        new_password: &str,
    ) -> Result<String, ClientError> {
        let message = self
            .session
            .change_password(old_password, new_password)
            .await?;
        self.navigate(NavigationIntent::Home);
        Ok(message)
    }

    /// Seed the lifecycle from the backend's status. Failures are logged only.
    async fn sync_status(&mut self, session: &Session) -> Option<ConfirmedMatchMarker> {
        match self.lifecycle.fetch_status(session).await {
            Ok(marker) => marker,
            Err(MatchError::Expired(reason)) => {
                warn!("[runtime] Stored session rejected by backend: {}", reason);
                self.session.handle_expired();
                None
            }
            Err(e) => {
                warn!("[runtime] Could not fetch match status: {}", e);
                None
            }
        }
    }

    // =========================================================================
    // Reports
    // =========================================================================

    pub fn draft(&self) -> &ReportDraft {
        self.reports.draft()
    }

    pub fn draft_mut(&mut self) -> &mut ReportDraft {
        self.reports.draft_mut()
    }

    /// Submit the draft. A match opens the review screen and loads it.
    pub async fn submit_report(&mut self) -> Result<SubmissionOutcome, ClientError> {
        let session = self.session.current().cloned();
        let outcome = match self.reports.submit(session.as_ref()).await {
            Ok(outcome) => outcome,
            Err(SubmissionError::Expired(reason)) => {
                self.session.handle_expired();
                return Err(SubmissionError::Expired(reason).into());
            }
            Err(e) => return Err(e.into()),
        };

        if let SubmissionOutcome::MatchFound(id) = &outcome {
            if let Err(e) = self.open_match(id).await {
                // Shown through the Failed review mode.
                warn!("[runtime] Match {} could not be loaded: {}", id, e);
            }
        }
        Ok(outcome)
    }

    // =========================================================================
    // Matches
    // =========================================================================

    /// Show the match review screen for a submission and load it.
    pub async fn open_match(&mut self, submission_id: &SubmissionId) -> Result<MatchPhase, ClientError> {
        self.navigate(NavigationIntent::MatchReview);
        match self.lifecycle.load_match(submission_id).await {
            Ok(phase) => Ok(phase),
            Err(MatchError::Expired(reason)) => {
                self.session.handle_expired();
                Err(MatchError::Expired(reason).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Show the review screen for the confirmed match, fetching its detail.
    pub async fn open_confirmed_match(&mut self) -> Result<MatchPhase, ClientError> {
        match self.lifecycle.marker() {
            Some(marker) => self.open_match(&marker.submission_id).await,
            None => {
                self.navigate(NavigationIntent::MatchReview);
                Ok(self.lifecycle.phase())
            }
        }
    }

    pub async fn confirm(&mut self) -> Transition {
        self.lifecycle.confirm().await
    }

    pub async fn reject(&mut self) -> Transition {
        self.lifecycle.reject().await
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Manual navigation. Changing the intent drops a scheduled return home.
    pub fn navigate(&mut self, intent: NavigationIntent) {
        if self.router.request(intent) {
            self.lifecycle.cancel_pending_navigation();
            self.drain_signals();
        }
    }

    /// Apply return-home signals that have arrived. Returns `true` if any did.
    pub fn poll_navigation(&mut self) -> bool {
        let mut applied = false;
        loop {
            match self.signals.try_recv() {
                Ok(signal) => {
                    info!("[runtime] {:?}", signal);
                    self.router.on_signal(&signal);
                    applied = true;
                }
                Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        applied
    }

    /// Wait for a scheduled return-home signal and apply it.
    ///
    /// Returns `None` at once if nothing is scheduled or queued.
    pub async fn wait_for_navigation(&mut self) -> Option<NavigationSignal> {
        loop {
            match self.signals.try_recv() {
                Ok(signal) => {
                    self.router.on_signal(&signal);
                    return Some(signal);
                }
                Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Closed) => return None,
            }
            if !self.lifecycle.has_pending_navigation() {
                // The timer queues its signal before clearing the pending flag.
                return match self.signals.try_recv() {
                    Ok(signal) => {
                        self.router.on_signal(&signal);
                        Some(signal)
                    }
                    Err(_) => None,
                };
            }
            match self.signals.recv().await {
                Ok(signal) => {
                    self.router.on_signal(&signal);
                    return Some(signal);
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    fn drain_signals(&mut self) {
        while !matches!(
            self.signals.try_recv(),
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed)
        ) {}
    }

    // =========================================================================
    // Read side
    // =========================================================================

    /// Screen for the current state, without consuming queued signals.
    pub fn screen(&self) -> Screen {
        self.router.resolve(RouterInput {
            session_present: self.session.current().is_some(),
            phase: self.lifecycle.phase(),
            marker_present: self.lifecycle.marker().is_some(),
        })
    }

    /// Apply queued signals, then resolve the screen.
    pub fn refresh(&mut self) -> Screen {
        self.poll_navigation();
        self.screen()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.current()
    }

    pub fn lifecycle_state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn marker(&self) -> Option<ConfirmedMatchMarker> {
        self.lifecycle.marker()
    }

    pub fn intent(&self) -> NavigationIntent {
        self.router.intent()
    }
}
