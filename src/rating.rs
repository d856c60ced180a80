//! Content Ratings - Ordinal Scale
//!
//! Ratings compare by position on the scale, never by string value.

use serde::{Deserialize, Serialize};

/// Ordered list of rating labels, lowest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingScale {
    levels: Vec<String>,
}

impl RatingScale {
    pub fn new<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            levels: levels.into_iter().map(Into::into).collect(),
        }
    }

    /// Position of `rating` on the scale, if it is on it.
    pub fn index_of(&self, rating: &str) -> Option<usize> {
        self.levels.iter().position(|level| level == rating)
    }

    pub fn contains(&self, rating: &str) -> bool {
        self.index_of(rating).is_some()
    }

    /// True iff `rating` sits at or above `threshold`.
    ///
    /// Labels missing from the scale never satisfy a threshold.
    pub fn meets(&self, rating: &str, threshold: &str) -> bool {
        match (self.index_of(rating), self.index_of(threshold)) {
            (Some(r), Some(t)) => r >= t,
            _ => false,
        }
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// Duplicate labels would make positions ambiguous.
    pub(crate) fn first_duplicate(&self) -> Option<&str> {
        self.levels
            .iter()
            .enumerate()
            .find(|(i, level)| self.levels[..*i].contains(*level))
            .map(|(_, level)| level.as_str())
    }
}

impl Default for RatingScale {
    fn default() -> Self {
        Self::new(["13+", "16+", "18+"])
    }
}
