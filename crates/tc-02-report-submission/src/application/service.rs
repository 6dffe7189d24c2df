//! # Report Submission Flow
//!
//! Application service owning the draft.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{
    validate_draft, ReportDraft, SubmissionError, SubmissionOutcome, SubmitReportResponse,
};
use crate::ports::{ReportGateway, ReportSubmissionApi};
use shared_types::{ReportRole, Session};

/// Report Submission Flow - one draft, one submission at a time.
pub struct ReportSubmissionFlow {
    gateway: Arc<dyn ReportGateway>,
    draft: ReportDraft,
}

impl ReportSubmissionFlow {
    pub fn new(gateway: Arc<dyn ReportGateway>) -> Self {
        Self::with_draft(gateway, ReportDraft::default())
    }

    /// Flow starting from an existing draft.
    pub fn with_draft(gateway: Arc<dyn ReportGateway>, draft: ReportDraft) -> Self {
        Self { gateway, draft }
    }

    /// Switch the form between parent and volunteer, keeping the typed fields.
    pub fn set_role(&mut self, role: ReportRole) {
        self.draft.role = role;
    }

    fn interpret(response: SubmitReportResponse) -> Result<SubmissionOutcome, SubmissionError> {
        if !response.match_found {
            return Ok(SubmissionOutcome::NoMatch);
        }
        match response.submission_id {
            Some(id) if !id.is_blank() => {
                match response.match_score {
                    Some(score) => info!("[tc-02] Match found for {} (score {:.3})", id, score),
                    None => info!("[tc-02] Match found for {}", id),
                }
                Ok(SubmissionOutcome::MatchFound(id))
            }
            _ => Err(SubmissionError::MalformedResponse(
                "match reported without a submission id".to_string(),
            )),
        }
    }
}

#[async_trait]
impl ReportSubmissionApi for ReportSubmissionFlow {
    async fn submit(
        &mut self,
        session: Option<&Session>,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        let report = validate_draft(&self.draft, session)?;
        let token = match session {
            Some(session) => session.token().clone(),
            None => return Err(SubmissionError::NotAuthenticated),
        };

        debug!("[tc-02] Submitting {} report", report.role());
        let outcome = match self.gateway.submit_report(&token, &report).await {
            Ok(response) => Self::interpret(response),
            Err(e) => Err(SubmissionError::from(e)),
        };

        match &outcome {
            Ok(SubmissionOutcome::NoMatch) => info!("[tc-02] Report stored, no match yet"),
            Ok(SubmissionOutcome::MatchFound(_)) => {}
            Err(e) => warn!("[tc-02] Submission failed, keeping draft: {}", e),
        }
        if outcome.is_ok() {
            self.clear_draft();
        }
        outcome
    }

    fn draft(&self) -> &ReportDraft {
        &self.draft
    }

    fn draft_mut(&mut self) -> &mut ReportDraft {
        &mut self.draft
    }

    fn clear_draft(&mut self) {
        self.draft = ReportDraft::for_role(self.draft.role);
    }
}
