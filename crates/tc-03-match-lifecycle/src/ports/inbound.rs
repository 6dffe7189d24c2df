//! # Inbound Ports

use crate::domain::{LifecycleState, MatchError, Transition};
use async_trait::async_trait;
use shared_types::{ConfirmedMatchMarker, MatchPhase, Session, SubmissionId};

/// Match Lifecycle API - inbound port.
#[async_trait]
pub trait MatchLifecycleApi: Send + Sync {
    /// Fetch and show the match for a submission.
    async fn load_match(&self, submission_id: &SubmissionId) -> Result<MatchPhase, MatchError>;

    /// Confirm the pending match. Backend failure is logged, not returned.
    async fn confirm(&self) -> Transition;

    /// Reject the pending match. Backend failure is logged, not returned.
    async fn reject(&self) -> Transition;

    /// Drop a scheduled return-home signal.
    fn cancel_pending_navigation(&self);

    /// Seed a confirmed match from the backend's status for this user.
    async fn fetch_status(
        &self,
        session: &Session,
    ) -> Result<Option<ConfirmedMatchMarker>, MatchError>;

    /// Forget the match, the marker and any scheduled signal.
    fn reset(&self);

    /// Snapshot of the current state.
    fn state(&self) -> LifecycleState;

    /// Current coarse phase.
    fn phase(&self) -> MatchPhase;

    /// Confirmed-match marker, if set.
    fn marker(&self) -> Option<ConfirmedMatchMarker>;
}
