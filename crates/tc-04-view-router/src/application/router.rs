//! # View Router
//!
//! Holds the navigation intent; everything else is read on demand.

use crate::domain::{resolve_screen, NavigationIntent, RouterInput, Screen};
use shared_types::NavigationSignal;
use tracing::debug;

/// View Router.
#[derive(Debug, Clone, Default)]
pub struct ViewRouter {
    intent: NavigationIntent,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intent(&self) -> NavigationIntent {
        self.intent
    }

    /// Request a navigation.
    ///
    /// Returns `true` if the intent changed. Re-requesting the current intent
    /// is a no-op; callers use the return value to decide whether a pending
    /// return-home signal should be cancelled.
    pub fn request(&mut self, intent: NavigationIntent) -> bool {
        if self.intent == intent {
            return false;
        }
        debug!("[tc-04] Intent {:?} -> {:?}", self.intent, intent);
        self.intent = intent;
        true
    }

    /// Apply a signal emitted by the match lifecycle controller.
    pub fn on_signal(&mut self, signal: &NavigationSignal) {
        match signal {
            NavigationSignal::ReturnHome { .. } => {
                self.request(NavigationIntent::Home);
            }
        }
    }

    /// Screen for the given state under the current intent.
    pub fn resolve(&self, input: RouterInput) -> Screen {
        resolve_screen(input, self.intent)
    }
}
