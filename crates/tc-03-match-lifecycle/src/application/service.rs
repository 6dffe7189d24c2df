//! # Match Lifecycle Controller
//!
//! Application service owning the current match and the confirmed-match marker.
//!
//! State lives behind one `parking_lot` mutex that is never held across an
//! `.await`. Two counters guard the asynchronous edges:
//!
//! - `epoch` moves whenever the controller starts tracking something new; a
//!   detail fetch that returns under a different epoch is discarded.
//! - `timer_epoch` moves whenever a return-home timer is scheduled or
//!   cancelled; a timer only fires if its ticket is still current.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::MatchLifecycleConfig;
use crate::domain::{LifecycleState, MatchError, MatchStatus, TrackedMatch, Transition};
use crate::ports::{MatchGateway, MatchLifecycleApi};
use shared_types::{
    ConfirmedMatchMarker, MatchDecision, MatchPhase, NavigationSignal, Session, SessionListener,
    SubmissionId,
};

const SIGNAL_CAPACITY: usize = 16;

#[derive(Default)]
struct Inner {
    state: LifecycleState,
    marker: Option<ConfirmedMatchMarker>,
    epoch: u64,
    timer_epoch: u64,
    pending_return: Option<JoinHandle<()>>,
}

impl Inner {
    fn cancel_return(&mut self) {
        self.timer_epoch += 1;
        if let Some(handle) = self.pending_return.take() {
            handle.abort();
        }
    }
}

/// How a `load_match` call proceeds after inspecting the state.
enum LoadPlan {
    Done(MatchPhase),
    Fetch { epoch: u64, attach: bool },
}

/// Match Lifecycle Controller.
///
/// Cheap to clone; clones share state and the signal channel.
#[derive(Clone)]
pub struct MatchLifecycleController {
    gateway: Arc<dyn MatchGateway>,
    config: MatchLifecycleConfig,
    inner: Arc<Mutex<Inner>>,
    signals: broadcast::Sender<NavigationSignal>,
}

impl MatchLifecycleController {
    pub fn new(gateway: Arc<dyn MatchGateway>, config: MatchLifecycleConfig) -> Self {
        let (signals, _) = broadcast::channel(SIGNAL_CAPACITY);
        Self {
            gateway,
            config,
            inner: Arc::new(Mutex::new(Inner::default())),
            signals,
        }
    }

    /// Receive return-home signals sent after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<NavigationSignal> {
        self.signals.subscribe()
    }

    /// True while a return-home signal is scheduled.
    pub fn has_pending_navigation(&self) -> bool {
        self.inner.lock().pending_return.is_some()
    }

    pub fn config(&self) -> &MatchLifecycleConfig {
        &self.config
    }

    fn plan_load(&self, submission_id: &SubmissionId) -> LoadPlan {
        let mut inner = self.inner.lock();
        let phase = inner.state.phase();
        match &inner.state {
            LifecycleState::Loading(id) if id == submission_id => return LoadPlan::Done(phase),
            LifecycleState::Active(m) if &m.submission_id == submission_id => {
                if m.detail.is_none() {
                    return LoadPlan::Fetch {
                        epoch: inner.epoch,
                        attach: true,
                    };
                }
                return LoadPlan::Done(phase);
            }
            _ => {}
        }

        inner.cancel_return();
        inner.epoch += 1;
        inner.state = LifecycleState::Loading(submission_id.clone());
        debug!("[tc-03] Loading match for {}", submission_id);
        LoadPlan::Fetch {
            epoch: inner.epoch,
            attach: false,
        }
    }

    fn schedule_return(&self, inner: &mut Inner, submission_id: SubmissionId, decision: MatchDecision) {
        inner.cancel_return();
        let ticket = inner.timer_epoch;
        let shared = Arc::clone(&self.inner);
        let signals = self.signals.clone();
        let delay = self.config.return_delay();

        inner.pending_return = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut guard = shared.lock();
            if guard.timer_epoch != ticket {
                return;
            }
            guard.timer_epoch += 1;
            guard.pending_return = None;
            debug!("[tc-03] Return delay elapsed for {}", submission_id);
            // Sent under the lock: once no return is pending, the signal is queued.
            let _ = signals.send(NavigationSignal::ReturnHome {
                submission_id,
                decision,
            });
        }));
    }

    async fn decide(&self, decision: MatchDecision) -> Transition {
        let submission_id = {
            let mut inner = self.inner.lock();
            let applied = match &mut inner.state {
                LifecycleState::Active(m) => m.decide(decision),
                _ => false,
            };
            let submission_id = match (&inner.state, applied) {
                (LifecycleState::Active(m), true) => m.submission_id.clone(),
                _ => {
                    debug!("[tc-03] {:?} ignored in phase {:?}", decision, inner.state.phase());
                    return Transition::Ignored(inner.state.phase());
                }
            };
            inner.marker = match decision {
                MatchDecision::Confirm => Some(ConfirmedMatchMarker::new(submission_id.clone())),
                MatchDecision::Reject => None,
            };
            self.schedule_return(&mut inner, submission_id.clone(), decision);
            submission_id
        };
        info!("[tc-03] Match {} {:?} locally", submission_id, decision.phase());

        let result = match decision {
            MatchDecision::Confirm => self.gateway.confirm_match(&submission_id).await,
            MatchDecision::Reject => self.gateway.reject_match(&submission_id).await,
        };
        if let Err(e) = result {
            let err = MatchError::BestEffort {
                decision,
                submission_id,
                reason: e.to_string(),
            };
            warn!("[tc-03] {}", err);
        }
        Transition::Applied(decision.phase())
    }
}

#[async_trait]
impl MatchLifecycleApi for MatchLifecycleController {
    async fn load_match(&self, submission_id: &SubmissionId) -> Result<MatchPhase, MatchError> {
        if submission_id.is_blank() {
            return Err(MatchError::MissingSubmissionId);
        }

        let (epoch, attach) = match self.plan_load(submission_id) {
            LoadPlan::Done(phase) => return Ok(phase),
            LoadPlan::Fetch { epoch, attach } => (epoch, attach),
        };

        let fetched = self.gateway.fetch_match_detail(submission_id).await;

        let mut inner = self.inner.lock();
        if inner.epoch != epoch {
            debug!("[tc-03] Discarding stale match detail for {}", submission_id);
            return Ok(inner.state.phase());
        }

        match fetched {
            Ok(detail) if attach => {
                if let LifecycleState::Active(m) = &mut inner.state {
                    m.attach_detail(detail);
                }
                Ok(inner.state.phase())
            }
            Ok(detail) => {
                inner.state =
                    LifecycleState::Active(TrackedMatch::pending(submission_id.clone(), detail));
                info!("[tc-03] Match {} awaiting decision", submission_id);
                Ok(MatchPhase::Pending)
            }
            Err(e) if attach => {
                let err = MatchError::from(e);
                warn!("[tc-03] Could not load detail for confirmed match {}: {}", submission_id, err);
                Err(err)
            }
            Err(e) => {
                let err = MatchError::from(e);
                warn!("[tc-03] Loading match {} failed: {}", submission_id, err);
                inner.state = LifecycleState::Failed {
                    submission_id: submission_id.clone(),
                    message: err.to_string(),
                };
                Err(err)
            }
        }
    }

    async fn confirm(&self) -> Transition {
        self.decide(MatchDecision::Confirm).await
    }

    async fn reject(&self) -> Transition {
        self.decide(MatchDecision::Reject).await
    }

    fn cancel_pending_navigation(&self) {
        let mut inner = self.inner.lock();
        if inner.pending_return.is_some() {
            debug!("[tc-03] Pending return cancelled");
        }
        inner.cancel_return();
    }

    async fn fetch_status(
        &self,
        session: &Session,
    ) -> Result<Option<ConfirmedMatchMarker>, MatchError> {
        let report = self
            .gateway
            .fetch_match_status(session.token())
            .await
            .map_err(MatchError::from)?;

        let Some(submission_id) = report.confirmed_submission().cloned() else {
            debug!("[tc-03] No confirmed match on record");
            return Ok(None);
        };
        let score = report.confirmed_match.as_ref().and_then(|info| info.score);

        let marker = ConfirmedMatchMarker::new(submission_id.clone());
        let mut inner = self.inner.lock();
        inner.marker = Some(marker.clone());
        let seed = match &inner.state {
            LifecycleState::Loading(_) => false,
            LifecycleState::Active(m) => match m.status {
                MatchStatus::Pending => false,
                MatchStatus::Confirmed => m.submission_id != submission_id,
                MatchStatus::Rejected => true,
            },
            LifecycleState::Idle | LifecycleState::Failed { .. } => true,
        };
        // A load in flight or a match awaiting a decision keeps the screen.
        if seed {
            inner.epoch += 1;
            inner.state = LifecycleState::Active(TrackedMatch::restored(submission_id, score));
        }
        info!("[tc-03] Restored confirmed match {}", marker.submission_id);
        Ok(Some(marker))
    }

    fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.cancel_return();
        inner.epoch += 1;
        inner.state = LifecycleState::Idle;
        inner.marker = None;
    }

    fn state(&self) -> LifecycleState {
        self.inner.lock().state.clone()
    }

    fn phase(&self) -> MatchPhase {
        self.inner.lock().state.phase()
    }

    fn marker(&self) -> Option<ConfirmedMatchMarker> {
        self.inner.lock().marker.clone()
    }
}

impl SessionListener for MatchLifecycleController {
    fn on_session_ended(&self) {
        debug!("[tc-03] Session ended, clearing match state");
        self.reset();
    }
}
