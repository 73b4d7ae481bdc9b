//! The Subjective Logic opinion value type.
//!
//! An opinion is a 4-tuple `<b, d, u, a>` of belief, disbelief, uncertainty
//! and base rate. The first three masses must sum to one; every component
//! must lie in `[0, 1]`. Components within ε of 0 or 1 pass the range check
//! but are stored exactly as given.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{OpinionError, Result};
use crate::tolerance::Tolerance;

/// An immutable Subjective Logic opinion.
///
/// Construction validates the invariant `b + d + u == 1` (within ε) and the
/// range of every component. Equality is ε-tolerant and componentwise; when
/// two opinions carry different tolerances the looser one is used, which
/// keeps the relation symmetric.
///
/// # Example
///
/// ```rust
/// use trustnet_opinion::{Opinion, Tolerance};
///
/// let tol = Tolerance::default();
/// let op = Opinion::new(0.7, 0.1, 0.2, 0.5, tol)?;
/// assert!((op.expected_value() - 0.8).abs() < 1e-12);
///
/// assert!(Opinion::new(0.7, 0.7, 0.2, 0.5, tol).is_err());
/// # Ok::<(), trustnet_opinion::OpinionError>(())
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "OpinionRepr", into = "OpinionRepr")]
pub struct Opinion {
    belief: f64,
    disbelief: f64,
    uncertainty: f64,
    base_rate: f64,
    tolerance: Tolerance,
}

impl Opinion {
    /// Creates a validated opinion.
    ///
    /// # Errors
    /// Returns [`OpinionError::InvalidOpinion`] if any component is outside
    /// `[0, 1]` or the masses do not sum to one, both beyond `tolerance`.
    pub fn new(
        belief: f64,
        disbelief: f64,
        uncertainty: f64,
        base_rate: f64,
        tolerance: Tolerance,
    ) -> Result<Self> {
        let opinion = Self {
            belief,
            disbelief,
            uncertainty,
            base_rate,
            tolerance,
        };
        if opinion.holds_under(tolerance) {
            Ok(opinion)
        } else {
            Err(opinion.rejection())
        }
    }

    /// `<1, 0, 0, 1/2>`: complete belief.
    pub fn full_belief(tolerance: Tolerance) -> Self {
        Self::canonical(1.0, 0.0, 0.0, tolerance)
    }

    /// `<0, 1, 0, 1/2>`: complete disbelief.
    pub fn full_disbelief(tolerance: Tolerance) -> Self {
        Self::canonical(0.0, 1.0, 0.0, tolerance)
    }

    /// `<0, 0, 1, 1/2>`: complete uncertainty.
    pub fn full_uncertainty(tolerance: Tolerance) -> Self {
        Self::canonical(0.0, 0.0, 1.0, tolerance)
    }

    /// Alias for [`Opinion::full_uncertainty`].
    pub fn vacuous(tolerance: Tolerance) -> Self {
        Self::full_uncertainty(tolerance)
    }

    fn canonical(belief: f64, disbelief: f64, uncertainty: f64, tolerance: Tolerance) -> Self {
        Self {
            belief,
            disbelief,
            uncertainty,
            base_rate: 0.5,
            tolerance,
        }
    }

    /// Belief mass `b`.
    pub fn belief(&self) -> f64 {
        self.belief
    }

    /// Disbelief mass `d`.
    pub fn disbelief(&self) -> f64 {
        self.disbelief
    }

    /// Uncertainty mass `u`.
    pub fn uncertainty(&self) -> f64 {
        self.uncertainty
    }

    /// Base rate `a`.
    pub fn base_rate(&self) -> f64 {
        self.base_rate
    }

    /// Tolerance this opinion was built with.
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Re-checks the range and sum invariant under an arbitrary tolerance.
    pub fn holds_under(&self, tolerance: Tolerance) -> bool {
        tolerance.in_unit_interval(self.belief)
            && tolerance.in_unit_interval(self.disbelief)
            && tolerance.in_unit_interval(self.uncertainty)
            && tolerance.in_unit_interval(self.base_rate)
            && tolerance.is_one(self.belief + self.disbelief + self.uncertainty)
    }

    pub(crate) fn rejection(&self) -> OpinionError {
        OpinionError::InvalidOpinion {
            belief: self.belief,
            disbelief: self.disbelief,
            uncertainty: self.uncertainty,
            base_rate: self.base_rate,
        }
    }

    /// Probability expectation `b + u*a`.
    pub fn expected_value(&self) -> f64 {
        self.belief + self.uncertainty * self.base_rate
    }

    /// Euclidean distance over `(b, d, u)`. The base rate does not count.
    pub fn distance(&self, other: &Opinion) -> f64 {
        ((self.belief - other.belief).powi(2)
            + (self.disbelief - other.disbelief).powi(2)
            + (self.uncertainty - other.uncertainty).powi(2))
        .sqrt()
    }

    /// Absolute difference between the two expected values.
    pub fn distance_expected_value(&self, other: &Opinion) -> f64 {
        (self.expected_value() - other.expected_value()).abs()
    }
}

impl PartialEq for Opinion {
    fn eq(&self, other: &Self) -> bool {
        let tol = self.tolerance.max(other.tolerance);
        tol.almost_eq(self.belief, other.belief)
            && tol.almost_eq(self.disbelief, other.disbelief)
            && tol.almost_eq(self.uncertainty, other.uncertainty)
            && tol.almost_eq(self.base_rate, other.base_rate)
    }
}

impl fmt::Display for Opinion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}, {}, {}, {}>",
            self.belief, self.disbelief, self.uncertainty, self.base_rate
        )
    }
}

/// Wire form of an opinion; validated on the way in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct OpinionRepr {
    belief: f64,
    disbelief: f64,
    uncertainty: f64,
    base_rate: f64,
    #[serde(default)]
    tolerance: Tolerance,
}

impl TryFrom<OpinionRepr> for Opinion {
    type Error = OpinionError;

    fn try_from(repr: OpinionRepr) -> Result<Self> {
        Opinion::new(
            repr.belief,
            repr.disbelief,
            repr.uncertainty,
            repr.base_rate,
            repr.tolerance,
        )
    }
}

impl From<Opinion> for OpinionRepr {
    fn from(op: Opinion) -> Self {
        Self {
            belief: op.belief,
            disbelief: op.disbelief,
            uncertainty: op.uncertainty,
            base_rate: op.base_rate,
            tolerance: op.tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tol() -> Tolerance {
        Tolerance::default()
    }

    #[test]
    fn test_valid_opinion() {
        let op = Opinion::new(0.2, 0.3, 0.5, 0.5, tol()).unwrap();
        assert_eq!(op.belief(), 0.2);
        assert_eq!(op.disbelief(), 0.3);
        assert_eq!(op.uncertainty(), 0.5);
        assert_eq!(op.base_rate(), 0.5);
    }

    #[test]
    fn test_sum_violation_rejected() {
        let err = Opinion::new(0.5, 0.5, 0.5, 0.5, tol()).unwrap_err();
        assert!(matches!(err, OpinionError::InvalidOpinion { .. }));
    }

    #[test]
    fn test_range_violation_rejected() {
        assert!(Opinion::new(1.2, -0.2, 0.0, 0.5, tol()).is_err());
        assert!(Opinion::new(0.5, 0.5, 0.0, 1.5, tol()).is_err());
    }

    #[test]
    fn test_near_bounds_accepted_without_clamping() {
        let op = Opinion::new(-1e-12, 0.5, 0.5 + 1e-12, 0.5, tol()).unwrap();
        assert_eq!(op.belief(), -1e-12);
    }

    #[test]
    fn test_nan_rejected() {
        assert!(Opinion::new(f64::NAN, 0.5, 0.5, 0.5, tol()).is_err());
    }

    #[test]
    fn test_tolerance_is_a_construction_parameter() {
        let loose = Tolerance::new(1e-2);
        assert!(Opinion::new(0.5, 0.3, 0.205, 0.5, loose).is_ok());
        assert!(Opinion::new(0.5, 0.3, 0.205, 0.5, tol()).is_err());
    }

    #[test]
    fn test_expected_value() {
        let op = Opinion::new(0.2, 0.3, 0.5, 0.4, tol()).unwrap();
        assert!((op.expected_value() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_distance_ignores_base_rate() {
        let a = Opinion::new(1.0, 0.0, 0.0, 0.1, tol()).unwrap();
        let b = Opinion::new(0.0, 1.0, 0.0, 0.9, tol()).unwrap();
        assert!((a.distance(&b) - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn test_distance_expected_value() {
        let a = Opinion::full_belief(tol());
        let b = Opinion::full_uncertainty(tol());
        assert!((a.distance_expected_value(&b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_tolerant_equality() {
        let a = Opinion::new(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0, 0.5, tol()).unwrap();
        let b = Opinion::new(0.333_333_333_333, 0.333_333_333_333, 0.333_333_333_334, 0.5, tol())
            .unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Opinion::full_belief(tol()));
    }

    #[test]
    fn test_base_rate_participates_in_equality() {
        let a = Opinion::new(0.2, 0.3, 0.5, 0.5, tol()).unwrap();
        let b = Opinion::new(0.2, 0.3, 0.5, 0.6, tol()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_display() {
        let op = Opinion::full_disbelief(tol());
        assert_eq!(op.to_string(), "<0, 1, 0, 0.5>");
    }

    #[test]
    fn test_serde_validates() {
        let op = Opinion::new(0.25, 0.25, 0.5, 0.5, tol()).unwrap();
        let json = serde_json::to_string(&op).unwrap();
        let parsed: Opinion = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, op);

        let bad = r#"{"belief":0.9,"disbelief":0.9,"uncertainty":0.0,"base_rate":0.5}"#;
        assert!(serde_json::from_str::<Opinion>(bad).is_err());
    }
}
