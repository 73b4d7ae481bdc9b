//! Beta bootstrap: turning interaction counts into an opinion.

use serde::{Deserialize, Serialize};

use crate::error::{OpinionError, Result};
use crate::opinion::Opinion;
use crate::tolerance::Tolerance;

/// Counts of positive and negative interactions with one party.
///
/// # Example
///
/// ```rust
/// use trustnet_opinion::{InteractionHistory, Opinion, Tolerance};
///
/// let tol = Tolerance::default();
/// let history = InteractionHistory::new(0, 0)?;
/// assert_eq!(history.to_opinion(tol)?, Opinion::full_uncertainty(tol));
/// # Ok::<(), trustnet_opinion::OpinionError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InteractionHistory {
    successes: u64,
    failures: u64,
}

impl InteractionHistory {
    /// Creates a history from signed counts.
    ///
    /// # Errors
    /// [`OpinionError::InvalidHistory`] if either count is negative.
    pub fn new(successes: i64, failures: i64) -> Result<Self> {
        match (u64::try_from(successes), u64::try_from(failures)) {
            (Ok(s), Ok(f)) => Ok(Self {
                successes: s,
                failures: f,
            }),
            _ => Err(OpinionError::InvalidHistory {
                successes,
                failures,
            }),
        }
    }

    /// Positive interactions.
    pub fn successes(&self) -> u64 {
        self.successes
    }

    /// Negative interactions.
    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Records one interaction.
    pub fn record(&mut self, success: bool) {
        if success {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
    }

    /// `<s/(s+f+2), f/(s+f+2), 2/(s+f+2), 1/2>`
    pub fn to_opinion(&self, tolerance: Tolerance) -> Result<Opinion> {
        let s = self.successes as f64;
        let f = self.failures as f64;
        let total = s + f + 2.0;
        Opinion::new(s / total, f / total, 2.0 / total, 0.5, tolerance)
    }
}
