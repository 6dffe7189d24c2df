//! # Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Similarity between the two reports of a match, in `[0, 1]`.
///
/// Displayed as a percentage with one decimal (`0.928` → `92.8%`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchScore(f64);

impl MatchScore {
    /// Wrap a raw score, clamping into `[0, 1]`. NaN becomes 0.
    pub fn new(raw: f64) -> Self {
        if raw.is_nan() {
            return Self(0.0);
        }
        Self(raw.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Score in percent.
    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_one_decimal() {
        assert_eq!(MatchScore::new(0.928).to_string(), "92.8%");
        assert_eq!(MatchScore::new(1.0).to_string(), "100.0%");
        assert_eq!(MatchScore::new(0.0).to_string(), "0.0%");
    }

    #[test]
    fn test_out_of_range_clamped() {
        assert_eq!(MatchScore::new(1.7).value(), 1.0);
        assert_eq!(MatchScore::new(-0.2).value(), 0.0);
        assert_eq!(MatchScore::new(f64::NAN).value(), 0.0);
    }
}
