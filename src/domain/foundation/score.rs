//! Score value object.
//!
//! A score is a whole-number percentage, with `-1` reserved for "nothing
//! judged yet". `0` means everything judged failed. Scores above 100 are
//! legal: the weather bonus is applied without a cap.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Completion score for an element, a zone or a whole inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(i32);

impl Score {
    /// No criterion has been judged.
    pub const NOT_EVALUATED: Self = Self(-1);

    /// Everything judged failed.
    pub const ZERO: Self = Self(0);

    /// Everything judged passed, without bonus.
    pub const FULL: Self = Self(100);

    /// Creates a score from a raw value. Anything below zero collapses to
    /// `NOT_EVALUATED`.
    pub fn new(value: i32) -> Self {
        Self(value.max(-1))
    }

    /// Returns the raw value (`-1` when not evaluated).
    pub fn value(&self) -> i32 {
        self.0
    }

    /// Whether at least one criterion contributed to this score.
    pub fn is_evaluated(&self) -> bool {
        self.0 >= 0
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::NOT_EVALUATED
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_evaluated() {
            write!(f, "{}%", self.0)
        } else {
            write!(f, "N/A")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_evaluated() {
        assert_eq!(Score::default(), Score::NOT_EVALUATED);
        assert!(!Score::default().is_evaluated());
    }

    #[test]
    fn zero_is_evaluated() {
        assert!(Score::ZERO.is_evaluated());
        assert_ne!(Score::ZERO, Score::NOT_EVALUATED);
    }

    #[test]
    fn negative_values_collapse_to_not_evaluated() {
        assert_eq!(Score::new(-7), Score::NOT_EVALUATED);
    }

    #[test]
    fn values_above_hundred_are_kept() {
        assert_eq!(Score::new(110).value(), 110);
    }

    #[test]
    fn displays_percentage_or_na() {
        assert_eq!(Score::new(64).to_string(), "64%");
        assert_eq!(Score::NOT_EVALUATED.to_string(), "N/A");
    }

    #[test]
    fn serializes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&Score::NOT_EVALUATED).unwrap(), "-1");
        let s: Score = serde_json::from_str("80").unwrap();
        assert_eq!(s.value(), 80);
    }
}
