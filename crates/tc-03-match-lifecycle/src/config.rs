//! # Match Lifecycle Configuration

use serde::{Deserialize, Serialize};

/// Delay before a decided match sends the user home.
pub const DEFAULT_RETURN_DELAY_MS: u64 = 2500;

/// Match lifecycle configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchLifecycleConfig {
    /// Milliseconds between a confirm/reject and the return-home signal.
    pub return_delay_ms: u64,
}

impl Default for MatchLifecycleConfig {
    fn default() -> Self {
        Self {
            return_delay_ms: DEFAULT_RETURN_DELAY_MS,
        }
    }
}

impl MatchLifecycleConfig {
    /// Create a config for testing (short delay).
    pub fn for_testing() -> Self {
        Self {
            return_delay_ms: 50,
        }
    }

    /// Delay as a `Duration`.
    pub fn return_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.return_delay_ms)
    }
}
