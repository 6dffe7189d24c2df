//! # Outbound Ports

use crate::domain::{Report, SubmitReportResponse};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{AuthToken, GatewayError};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Report endpoint - outbound port.
#[async_trait]
pub trait ReportGateway: Send + Sync {
    /// `POST /api/report` as a multipart form.
    async fn submit_report(
        &self,
        token: &AuthToken,
        report: &Report,
    ) -> Result<SubmitReportResponse, GatewayError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock report gateway for testing.
pub struct MockReportGateway {
    /// Answer returned by every call.
    pub response: Result<SubmitReportResponse, GatewayError>,
    /// Number of submissions received.
    pub calls: AtomicUsize,
    /// Last report received.
    pub last_report: Mutex<Option<Report>>,
}

impl MockReportGateway {
    /// Gateway answering with this response.
    pub fn answering(response: SubmitReportResponse) -> Self {
        Self {
            response: Ok(response),
            calls: AtomicUsize::new(0),
            last_report: Mutex::new(None),
        }
    }

    /// Gateway reporting no match.
    pub fn no_match() -> Self {
        Self::answering(SubmitReportResponse {
            match_found: false,
            submission_id: None,
            match_score: None,
        })
    }

    /// Gateway reporting a match under `submission_id`.
    pub fn matching(submission_id: &str, score: f64) -> Self {
        Self::answering(SubmitReportResponse {
            match_found: true,
            submission_id: Some(submission_id.into()),
            match_score: Some(score),
        })
    }

    /// Gateway failing every call.
    pub fn failing(err: GatewayError) -> Self {
        Self {
            response: Err(err),
            calls: AtomicUsize::new(0),
            last_report: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReportGateway for MockReportGateway {
    async fn submit_report(
        &self,
        _token: &AuthToken,
        report: &Report,
    ) -> Result<SubmitReportResponse, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_report.lock() = Some(report.clone());
        self.response.clone()
    }
}
