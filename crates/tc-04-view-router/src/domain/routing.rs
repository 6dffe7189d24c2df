//! # Routing
//!
//! The pure state → screen mapping.

use super::entities::{NavigationIntent, ReviewMode, RouterInput, Screen};
use shared_types::MatchPhase;

/// Resolve the screen for a state and an intent.
///
/// 1. No session → Login, whatever the intent
/// 2. Profile intent → Profile
/// 3. Match review intent → review mode from the lifecycle phase, or
///    Confirmed mode when only the marker is known
/// 4. Otherwise → Home
pub fn resolve_screen(input: RouterInput, intent: NavigationIntent) -> Screen {
    if !input.session_present {
        return Screen::Login;
    }
    match intent {
        NavigationIntent::Profile => Screen::Profile,
        NavigationIntent::MatchReview => review_mode(input)
            .map(Screen::MatchReview)
            .unwrap_or(Screen::Home),
        NavigationIntent::Home => Screen::Home,
    }
}

fn review_mode(input: RouterInput) -> Option<ReviewMode> {
    match input.phase {
        MatchPhase::Loading => Some(ReviewMode::Loading),
        MatchPhase::Pending => Some(ReviewMode::Pending),
        MatchPhase::Failed => Some(ReviewMode::Failed),
        MatchPhase::Confirmed => Some(ReviewMode::Confirmed),
        MatchPhase::Rejected => Some(ReviewMode::Rejected),
        MatchPhase::Idle if input.marker_present => Some(ReviewMode::Confirmed),
        MatchPhase::Idle => None,
    }
}
