//! Numerical tolerance used for every opinion check and comparison.

use serde::{Deserialize, Serialize};

/// Default tolerance ε.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Explicit tolerance ε threaded through construction, comparison and operators.
///
/// Two reals are *almost equal* when their absolute difference is at most ε,
/// or when their relative difference is at most ε.
///
/// # Example
///
/// ```rust
/// use trustnet_opinion::Tolerance;
///
/// let tol = Tolerance::new(1e-6);
/// assert!(tol.almost_eq(1.0, 1.0 + 1e-7));
/// assert!(!tol.almost_eq(1.0, 1.001));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Tolerance(f64);

impl Tolerance {
    /// Creates a tolerance.
    ///
    /// # Panics
    /// Panics if `epsilon` is negative or not finite.
    pub fn new(epsilon: f64) -> Self {
        assert!(
            epsilon.is_finite() && epsilon >= 0.0,
            "Tolerance must be a finite non-negative number"
        );
        Self(epsilon)
    }

    /// Returns ε.
    pub fn epsilon(&self) -> f64 {
        self.0
    }

    /// Absolute-or-relative comparison.
    pub fn almost_eq(&self, s: f64, t: f64) -> bool {
        let diff = (s - t).abs();
        if diff <= self.0 {
            return true;
        }
        let scale = s.abs().max(t.abs());
        scale > 0.0 && diff / scale <= self.0
    }

    /// Returns true if `value` is almost 0.
    pub fn is_zero(&self, value: f64) -> bool {
        self.almost_eq(value, 0.0)
    }

    /// Returns true if `value` is almost 1.
    pub fn is_one(&self, value: f64) -> bool {
        self.almost_eq(value, 1.0)
    }

    /// Accepts values in `[0, 1]`, or almost 0, or almost 1.
    pub fn in_unit_interval(&self, value: f64) -> bool {
        self.is_zero(value) || self.is_one(value) || (0.0..=1.0).contains(&value)
    }

    /// Snaps a value within ε of 0 or 1 to exactly 0 or 1.
    pub fn snap(&self, value: f64) -> f64 {
        if self.is_one(value) {
            1.0
        } else if self.is_zero(value) {
            0.0
        } else {
            value
        }
    }

    /// The looser of two tolerances.
    pub fn max(self, other: Tolerance) -> Tolerance {
        Tolerance(self.0.max(other.0))
    }
}

impl TryFrom<f64> for Tolerance {
    type Error = String;

    fn try_from(epsilon: f64) -> Result<Self, Self::Error> {
        if epsilon.is_finite() && epsilon >= 0.0 {
            Ok(Self(epsilon))
        } else {
            Err(format!("tolerance must be finite and non-negative, got {epsilon}"))
        }
    }
}

impl From<Tolerance> for f64 {
    fn from(tolerance: Tolerance) -> Self {
        tolerance.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(DEFAULT_EPSILON)
    }
}
