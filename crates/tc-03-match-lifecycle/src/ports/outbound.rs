//! # Outbound Ports
//!
//! Match endpoints.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared_types::{AuthToken, GatewayError, MatchDetail, SubmissionId};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Match info attached to a report by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfirmedMatchInfo {
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub confirmed_at: Option<String>,
}

/// Answer of `GET /api/auth/me/status`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchStatusReport {
    #[serde(default)]
    pub confirmed_match: Option<ConfirmedMatchInfo>,
    #[serde(default)]
    pub submission_id: Option<SubmissionId>,
}

impl MatchStatusReport {
    /// Submission of the user's confirmed match, if the backend reported one.
    pub fn confirmed_submission(&self) -> Option<&SubmissionId> {
        match (&self.confirmed_match, &self.submission_id) {
            (Some(info), Some(id)) if info.confirmed && !id.is_blank() => Some(id),
            _ => None,
        }
    }
}

/// Match endpoints - outbound port.
#[async_trait]
pub trait MatchGateway: Send + Sync {
    /// `GET /api/match/{id}`.
    async fn fetch_match_detail(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<MatchDetail, GatewayError>;

    /// `GET /api/auth/me/status`.
    async fn fetch_match_status(&self, token: &AuthToken)
        -> Result<MatchStatusReport, GatewayError>;

    /// `POST /api/confirm`.
    async fn confirm_match(&self, submission_id: &SubmissionId) -> Result<(), GatewayError>;

    /// `POST /api/reject`.
    async fn reject_match(&self, submission_id: &SubmissionId) -> Result<(), GatewayError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock match gateway for testing.
#[derive(Default)]
pub struct MockMatchGateway {
    /// Detail served for any id; `None` answers 404.
    pub detail: Mutex<Option<MatchDetail>>,
    /// Status report served to `fetch_match_status`.
    pub status: Mutex<MatchStatusReport>,
    /// Fail every confirm/reject with a transport error.
    pub fail_decisions: AtomicBool,
    /// Fail every detail fetch with a transport error.
    pub fail_fetch: AtomicBool,
    pub detail_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
    pub confirm_calls: AtomicUsize,
    pub reject_calls: AtomicUsize,
}

impl MockMatchGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway serving this detail.
    pub fn with_detail(detail: MatchDetail) -> Self {
        let gateway = Self::default();
        *gateway.detail.lock() = Some(detail);
        gateway
    }

    /// Make the status endpoint report a confirmed match.
    pub fn set_confirmed(&self, submission_id: &str, score: f64) {
        *self.status.lock() = MatchStatusReport {
            confirmed_match: Some(ConfirmedMatchInfo {
                confirmed: true,
                score: Some(score),
                confirmed_at: None,
            }),
            submission_id: Some(SubmissionId::new(submission_id)),
        };
    }

    pub fn set_fail_decisions(&self, fail: bool) {
        self.fail_decisions.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    /// Confirm plus reject calls.
    pub fn decision_calls(&self) -> usize {
        self.confirm_calls.load(Ordering::SeqCst) + self.reject_calls.load(Ordering::SeqCst)
    }

    fn decision_result(&self) -> Result<(), GatewayError> {
        if self.fail_decisions.load(Ordering::SeqCst) {
            return Err(GatewayError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MatchGateway for MockMatchGateway {
    async fn fetch_match_detail(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<MatchDetail, GatewayError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(GatewayError::Transport("connection refused".to_string()));
        }
        match self.detail.lock().clone() {
            Some(mut detail) => {
                detail.submission_id = submission_id.clone();
                Ok(detail)
            }
            None => Err(GatewayError::NotFound("Submission not found".to_string())),
        }
    }

    async fn fetch_match_status(
        &self,
        _token: &AuthToken,
    ) -> Result<MatchStatusReport, GatewayError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.status.lock().clone())
    }

    async fn confirm_match(&self, _submission_id: &SubmissionId) -> Result<(), GatewayError> {
        self.confirm_calls.fetch_add(1, Ordering::SeqCst);
        self.decision_result()
    }

    async fn reject_match(&self, _submission_id: &SubmissionId) -> Result<(), GatewayError> {
        self.reject_calls.fetch_add(1, Ordering::SeqCst);
        self.decision_result()
    }
}
