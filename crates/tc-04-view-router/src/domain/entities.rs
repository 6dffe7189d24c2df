//! # Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::MatchPhase;
use std::fmt;

/// Where the user asked to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NavigationIntent {
    #[default]
    Home,
    MatchReview,
    Profile,
}

/// How the match review screen presents itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewMode {
    Loading,
    Pending,
    Failed,
    Confirmed,
    Rejected,
}

impl ReviewMode {
    /// Terminal modes show the decision instead of the decision buttons.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReviewMode::Confirmed | ReviewMode::Rejected)
    }
}

/// The screen to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Login,
    Home,
    MatchReview(ReviewMode),
    Profile,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Login => f.write_str("login"),
            Screen::Home => f.write_str("home"),
            Screen::MatchReview(mode) => write!(f, "match-review ({:?})", mode),
            Screen::Profile => f.write_str("profile"),
        }
    }
}

/// State the router reads; owned elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouterInput {
    pub session_present: bool,
    pub phase: MatchPhase,
    pub marker_present: bool,
}
