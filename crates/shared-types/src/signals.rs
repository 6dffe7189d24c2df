//! # Cross-Subsystem Signals
//!
//! The lifecycle phase read by the view router, the navigation signal emitted
//! by the match lifecycle controller, and the hook the session controller
//! calls when a session ends.

use crate::entities::SubmissionId;

/// Coarse phase of the match lifecycle state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchPhase {
    /// No match is being tracked.
    #[default]
    Idle,
    /// Match detail is being fetched.
    Loading,
    /// Match detail is on screen awaiting a decision.
    Pending,
    /// User confirmed the match (or a confirmed match was restored).
    Confirmed,
    /// User rejected the match.
    Rejected,
    /// Fetching match detail failed; terminal for that submission.
    Failed,
}

impl MatchPhase {
    /// True for the user decisions that can never be reversed.
    pub fn is_decided(&self) -> bool {
        matches!(self, MatchPhase::Confirmed | MatchPhase::Rejected)
    }
}

/// The user's terminal decision on a proposed match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchDecision {
    Confirm,
    Reject,
}

impl MatchDecision {
    /// Phase entered by this decision.
    pub fn phase(&self) -> MatchPhase {
        match self {
            MatchDecision::Confirm => MatchPhase::Confirmed,
            MatchDecision::Reject => MatchPhase::Rejected,
        }
    }
}

/// Navigation request emitted without user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationSignal {
    /// Delay after a decision elapsed; go back to the home screen.
    ReturnHome {
        submission_id: SubmissionId,
        decision: MatchDecision,
    },
}

/// Notified by the session controller when the current session ends.
///
/// Implementors must drop any state tied to the departing identity.
pub trait SessionListener: Send + Sync {
    /// The session was cleared (logout, expired token, password change).
    fn on_session_ended(&self);
}
