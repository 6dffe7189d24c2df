//! # Inbound Ports

use crate::domain::{ReportDraft, SubmissionError, SubmissionOutcome};
use async_trait::async_trait;
use shared_types::Session;

/// Report Submission API - inbound port.
#[async_trait]
pub trait ReportSubmissionApi: Send + Sync {
    /// Validate the draft, send it once, and reset it on success.
    async fn submit(
        &mut self,
        session: Option<&Session>,
    ) -> Result<SubmissionOutcome, SubmissionError>;

    /// Draft being edited.
    fn draft(&self) -> &ReportDraft;

    /// Mutable access to the draft.
    fn draft_mut(&mut self) -> &mut ReportDraft;

    /// Discard everything typed so far, keeping the role.
    fn clear_draft(&mut self);
}
