//! # Domain Entities
//!
//! The single match the controller tracks and the state around it.

use super::value_objects::MatchScore;
use shared_types::{MatchDecision, MatchDetail, MatchPhase, SubmissionId};

/// Decision status of a tracked match. Moves only out of `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    Pending,
    Confirmed,
    Rejected,
}

/// A match held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedMatch {
    pub submission_id: SubmissionId,
    /// Full detail; absent for a confirmed match restored from status only.
    pub detail: Option<MatchDetail>,
    pub score: Option<MatchScore>,
    pub status: MatchStatus,
}

impl TrackedMatch {
    /// Freshly loaded match awaiting a decision.
    pub fn pending(submission_id: SubmissionId, detail: MatchDetail) -> Self {
        let score = Some(MatchScore::new(detail.match_score));
        Self {
            submission_id,
            detail: Some(detail),
            score,
            status: MatchStatus::Pending,
        }
    }

    /// Confirmed match known only from the status endpoint.
    pub fn restored(submission_id: SubmissionId, score: Option<f64>) -> Self {
        Self {
            submission_id,
            detail: None,
            score: score.map(MatchScore::new),
            status: MatchStatus::Confirmed,
        }
    }

    /// Attach detail fetched after a restore. Status is kept.
    pub fn attach_detail(&mut self, detail: MatchDetail) {
        self.score = Some(MatchScore::new(detail.match_score));
        self.detail = Some(detail);
    }

    /// Apply a decision. Returns `false` (and changes nothing) unless pending.
    pub fn decide(&mut self, decision: MatchDecision) -> bool {
        if self.status != MatchStatus::Pending {
            return false;
        }
        self.status = match decision {
            MatchDecision::Confirm => MatchStatus::Confirmed,
            MatchDecision::Reject => MatchStatus::Rejected,
        };
        true
    }

    pub fn phase(&self) -> MatchPhase {
        match self.status {
            MatchStatus::Pending => MatchPhase::Pending,
            MatchStatus::Confirmed => MatchPhase::Confirmed,
            MatchStatus::Rejected => MatchPhase::Rejected,
        }
    }
}

/// Full lifecycle state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LifecycleState {
    #[default]
    Idle,
    /// Detail for this submission is being fetched.
    Loading(SubmissionId),
    /// A match is on screen (pending or decided).
    Active(TrackedMatch),
    /// Loading failed; terminal for this submission until explicitly reloaded.
    Failed {
        submission_id: SubmissionId,
        message: String,
    },
}

impl LifecycleState {
    pub fn phase(&self) -> MatchPhase {
        match self {
            LifecycleState::Idle => MatchPhase::Idle,
            LifecycleState::Loading(_) => MatchPhase::Loading,
            LifecycleState::Active(m) => m.phase(),
            LifecycleState::Failed { .. } => MatchPhase::Failed,
        }
    }

    /// Submission the state refers to, if any.
    pub fn submission_id(&self) -> Option<&SubmissionId> {
        match self {
            LifecycleState::Idle => None,
            LifecycleState::Loading(id) => Some(id),
            LifecycleState::Active(m) => Some(&m.submission_id),
            LifecycleState::Failed { submission_id, .. } => Some(submission_id),
        }
    }

    pub fn tracked(&self) -> Option<&TrackedMatch> {
        match self {
            LifecycleState::Active(m) => Some(m),
            _ => None,
        }
    }
}

/// Result of a confirm/reject request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The decision was taken; the controller is now in this phase.
    Applied(MatchPhase),
    /// Nothing to decide; the controller stays in this phase.
    Ignored(MatchPhase),
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied(_))
    }

    pub fn phase(&self) -> MatchPhase {
        match self {
            Transition::Applied(p) | Transition::Ignored(p) => *p,
        }
    }
}
