//! Operators combining opinions.
//!
//! All operators are pure: they validate their operands under the library's
//! tolerance and return a fresh [`Opinion`].
//!
//! | Operator | Kind |
//! |----------|------|
//! | [`OperatorLibrary::discount`] | Josang discount |
//! | [`OperatorLibrary::consensus`] | Josang pairwise fusion |
//! | [`OperatorLibrary::consensus_on_a_list`] | Josang N-ary fold |
//! | [`OperatorLibrary::graphical_discount_merge`] | Weighted geometric merge |
//! | [`OperatorLibrary::graphical_combination`] (and `2`, `3`) | Graphical discount family |
//! | [`OperatorLibrary::discount_uai_referee`] | Alternate referee discount |
//!
//! ## References
//!
//! - Jøsang, Hayward, Pope (2006). "Trust Network Analysis with Subjective Logic"
//! - Cerutti, Toniolo, Oren, Norman (2013). "Context-dependent trust decisions
//!   with subjective logic", <http://arxiv.org/abs/1309.4994>

use std::f64::consts::FRAC_PI_2;

use tracing::debug;

use crate::error::{OpinionError, Result};
use crate::geometry::SIXTY_DEGREES;
use crate::opinion::Opinion;
use crate::tolerance::Tolerance;

/// A source's opinion paired with how much we trust that source:
/// `(trust in source, source's opinion)`.
pub type TrustPair = (Opinion, Opinion);

/// Angle formula deriving the rotation `α'` from `(t, c)`.
pub type AngleStrategy = fn(&Opinion, &Opinion) -> f64;

/// The three members of the graphical combination family.
///
/// They share one geometric primitive and differ only in how the target
/// rotation angle `α'` is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphicalVariant {
    /// `α' = c.α · t.ε / 60° − t.β`
    Scaled,
    /// `α' = c.α · (t.ε − t.β) / 60°`
    Parallel,
    /// `α' = c.α / 60° · t.ε / 2 + t.ε / 2 − t.β`
    Half,
}

impl GraphicalVariant {
    /// Returns the angle formula of this variant.
    pub fn strategy(self) -> AngleStrategy {
        match self {
            GraphicalVariant::Scaled => scaled_angle,
            GraphicalVariant::Parallel => parallel_angle,
            GraphicalVariant::Half => half_angle,
        }
    }
}

fn scaled_angle(t: &Opinion, c: &Opinion) -> f64 {
    c.angle_alpha() * t.angle_epsilon() / SIXTY_DEGREES - t.angle_beta()
}

fn parallel_angle(t: &Opinion, c: &Opinion) -> f64 {
    c.angle_alpha() * (t.angle_epsilon() - t.angle_beta()) / SIXTY_DEGREES
}

fn half_angle(t: &Opinion, c: &Opinion) -> f64 {
    c.angle_alpha() / SIXTY_DEGREES * t.angle_epsilon() / 2.0 + t.angle_epsilon() / 2.0
        - t.angle_beta()
}

/// Library of opinion operators bound to one tolerance.
///
/// # Example
///
/// ```rust
/// use trustnet_opinion::{OperatorLibrary, Opinion, Tolerance};
///
/// let ops = OperatorLibrary::new(Tolerance::default());
/// let distrust = Opinion::full_disbelief(ops.tolerance());
/// let belief = Opinion::full_belief(ops.tolerance());
///
/// // Total distrust turns any recommendation into full uncertainty.
/// let derived = ops.discount(&distrust, &belief)?;
/// assert_eq!(derived, Opinion::full_uncertainty(ops.tolerance()));
/// # Ok::<(), trustnet_opinion::OpinionError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OperatorLibrary {
    tolerance: Tolerance,
}

impl OperatorLibrary {
    /// Creates an operator library.
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    /// Returns the tolerance used for checks and results.
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    fn operand(&self, op: &Opinion, role: &str) -> Result<()> {
        if op.holds_under(self.tolerance) {
            Ok(())
        } else {
            Err(OpinionError::InvalidOperand(format!("{role} {op}")))
        }
    }

    fn pairs(&self, pairs: &[TrustPair]) -> Result<()> {
        if pairs.len() < 2 {
            return Err(OpinionError::Configuration(format!(
                "two or more <trust, opinion> pairs required, got {}",
                pairs.len()
            )));
        }
        for (trust, opinion) in pairs {
            self.operand(trust, "trust")?;
            self.operand(opinion, "opinion")?;
        }
        Ok(())
    }

    fn opinion(&self, b: f64, d: f64, u: f64, a: f64) -> Result<Opinion> {
        Opinion::new(b, d, u, a, self.tolerance)
    }

    /// Josang discount of `b_about_x` by `a_about_b`.
    ///
    /// `<Ab·Xb, Ab·Xd, Ad + Au + Ab·Xu, Xa>`
    pub fn discount(&self, a_about_b: &Opinion, b_about_x: &Opinion) -> Result<Opinion> {
        self.operand(a_about_b, "trust")?;
        self.operand(b_about_x, "recommendation")?;

        self.opinion(
            a_about_b.belief() * b_about_x.belief(),
            a_about_b.belief() * b_about_x.disbelief(),
            a_about_b.disbelief()
                + a_about_b.uncertainty()
                + a_about_b.belief() * b_about_x.uncertainty(),
            b_about_x.base_rate(),
        )
    }

    /// Josang pairwise consensus. The base rate of the first operand is kept.
    ///
    /// # Errors
    /// [`OpinionError::DegenerateConsensus`] when both operands are dogmatic.
    pub fn consensus(&self, first: &Opinion, second: &Opinion) -> Result<Opinion> {
        self.operand(first, "first")?;
        self.operand(second, "second")?;

        let (u1, u2) = (first.uncertainty(), second.uncertainty());
        let kappa = u1 + u2 - u1 * u2;
        if kappa == 0.0 {
            return Err(OpinionError::DegenerateConsensus);
        }

        self.opinion(
            (first.belief() * u2 + second.belief() * u1) / kappa,
            (first.disbelief() * u2 + second.disbelief() * u1) / kappa,
            (u1 * u2) / kappa,
            first.base_rate(),
        )
    }

    /// Left fold of [`OperatorLibrary::consensus`] over the opinions.
    ///
    /// The trust half of every pair is ignored. This follows the Josang
    /// formulation, where the recommendations reaching this point are
    /// already discounted.
    pub fn consensus_on_a_list(&self, pairs: &[TrustPair]) -> Result<Opinion> {
        self.pairs(pairs)?;

        let (_, first) = pairs[0];
        pairs[1..]
            .iter()
            .try_fold(first, |acc, (_, opinion)| self.consensus(&acc, opinion))
    }

    /// Weighted average of the opinions, weighting each by `t.b + t.u/2`.
    ///
    /// The result always has base rate one half.
    pub fn graphical_discount_merge(&self, pairs: &[TrustPair]) -> Result<Opinion> {
        self.pairs(pairs)?;

        let (mut total, mut belief, mut disbelief, mut uncertainty) = (0.0, 0.0, 0.0, 0.0);
        for (trust, opinion) in pairs {
            let k = trust.belief() + trust.uncertainty() / 2.0;
            total += k;
            belief += k * opinion.belief();
            disbelief += k * opinion.disbelief();
            uncertainty += k * opinion.uncertainty();
        }
        if self.tolerance.is_zero(total) {
            return Err(OpinionError::ZeroWeight);
        }

        self.opinion(belief / total, disbelief / total, uncertainty / total, 0.5)
    }

    /// Graphical combination with the scaled rotation angle.
    pub fn graphical_combination(&self, t: &Opinion, c: &Opinion) -> Result<Opinion> {
        self.graphical(GraphicalVariant::Scaled, t, c)
    }

    /// Graphical combination, parallel formulation.
    pub fn graphical_combination2(&self, t: &Opinion, c: &Opinion) -> Result<Opinion> {
        self.graphical(GraphicalVariant::Parallel, t, c)
    }

    /// Graphical combination, half-angle formulation.
    pub fn graphical_combination3(&self, t: &Opinion, c: &Opinion) -> Result<Opinion> {
        self.graphical(GraphicalVariant::Half, t, c)
    }

    /// Graphical combination for the given variant.
    pub fn graphical(&self, variant: GraphicalVariant, t: &Opinion, c: &Opinion) -> Result<Opinion> {
        self.family_graphical_combination(t, c, variant.strategy())
    }

    /// Shared primitive of the graphical family.
    ///
    /// Rotates `t`'s position on the opinion triangle by `α'` with a magnitude
    /// scaled from `c`'s magnitude ratio. Three values of `α'` make the general
    /// magnitude formula divide by a vanishing quantity; those use closed forms.
    pub fn family_graphical_combination(
        &self,
        t: &Opinion,
        c: &Opinion,
        alpha_prime: AngleStrategy,
    ) -> Result<Opinion> {
        self.operand(t, "trust")?;
        self.operand(c, "recommendation")?;

        let tol = self.tolerance;
        let angle = alpha_prime(t, c);
        let sqrt3 = 3f64.sqrt();

        let magnitude = if tol.almost_eq(angle, -SIXTY_DEGREES) {
            debug!("Graphical boundary at -60 degrees (alpha' = {})", angle);
            c.magnitude_ratio() * (2.0 * t.uncertainty() / sqrt3)
        } else if tol.almost_eq(angle, 2.0 * SIXTY_DEGREES) {
            debug!("Graphical boundary at 120 degrees (alpha' = {})", angle);
            c.magnitude_ratio() * (2.0 * (1.0 - t.uncertainty()) / sqrt3)
        } else if tol.almost_eq(angle, FRAC_PI_2) {
            debug!("Graphical boundary at 90 degrees (alpha' = {})", angle);
            2.0 * t.belief()
        } else {
            let tan = angle.tan();
            c.magnitude_ratio() * (2.0 * ((tan * tan + 1.0).sqrt() / (tan + sqrt3).abs()) * t.belief())
        };

        let uncertainty = t.uncertainty() + angle.sin() * magnitude;
        let disbelief = t.disbelief()
            + (t.uncertainty() - uncertainty) * SIXTY_DEGREES.cos()
            + angle.cos() * SIXTY_DEGREES.sin() * magnitude;

        let uncertainty = tol.snap(uncertainty);
        let disbelief = tol.snap(disbelief);

        self.opinion(1.0 - disbelief - uncertainty, disbelief, uncertainty, 0.5)
    }

    /// Referee discount: `<c.b·t.b, c.b·t.d + c.d, c.b·t.u + c.u, 1/2>`.
    pub fn discount_uai_referee(&self, t: &Opinion, c: &Opinion) -> Result<Opinion> {
        self.operand(t, "trust")?;
        self.operand(c, "recommendation")?;

        self.opinion(
            c.belief() * t.belief(),
            c.belief() * t.disbelief() + c.disbelief(),
            c.belief() * t.uncertainty() + c.uncertainty(),
            0.5,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops() -> OperatorLibrary {
        OperatorLibrary::new(Tolerance::default())
    }

    fn op(b: f64, d: f64, u: f64) -> Opinion {
        Opinion::new(b, d, u, 0.5, Tolerance::default()).unwrap()
    }

    #[test]
    fn test_discount_total_distrust() {
        let ops = ops();
        let result = ops.discount(&op(0.0, 1.0, 0.0), &op(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(result, op(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_discount_full_trust_is_identity() {
        let ops = ops();
        let x = Opinion::new(0.6, 0.1, 0.3, 0.7, Tolerance::default()).unwrap();
        let result = ops.discount(&op(1.0, 0.0, 0.0), &x).unwrap();
        assert_eq!(result, x);
    }

    #[test]
    fn test_discount_keeps_recommended_base_rate() {
        let ops = ops();
        let x = Opinion::new(0.6, 0.1, 0.3, 0.2, Tolerance::default()).unwrap();
        let result = ops.discount(&op(0.5, 0.2, 0.3), &x).unwrap();
        assert!((result.belief() - 0.3).abs() < 1e-12);
        assert!((result.disbelief() - 0.05).abs() < 1e-12);
        assert!((result.uncertainty() - 0.65).abs() < 1e-12);
        assert_eq!(result.base_rate(), 0.2);
    }

    #[test]
    fn test_operand_checked_under_library_tolerance() {
        let loose = Opinion::new(0.5, 0.3, 0.205, 0.5, Tolerance::new(1e-2)).unwrap();
        let err = ops().discount(&loose, &op(1.0, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, OpinionError::InvalidOperand(_)));
    }

    #[test]
    fn test_consensus() {
        let ops = ops();
        let result = ops.consensus(&op(0.5, 0.0, 0.5), &op(0.0, 0.5, 0.5)).unwrap();
        // kappa = 0.75
        assert!((result.belief() - 1.0 / 3.0).abs() < 1e-12);
        assert!((result.disbelief() - 1.0 / 3.0).abs() < 1e-12);
        assert!((result.uncertainty() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_consensus_with_vacuous_is_identity() {
        let ops = ops();
        let x = op(0.4, 0.4, 0.2);
        let result = ops.consensus(&x, &op(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(result, x);
    }

    #[test]
    fn test_consensus_is_commutative() {
        let ops = ops();
        let (x, y) = (op(0.4, 0.4, 0.2), op(0.1, 0.6, 0.3));
        assert_eq!(ops.consensus(&x, &y).unwrap(), ops.consensus(&y, &x).unwrap());
    }

    #[test]
    fn test_consensus_degenerate() {
        let ops = ops();
        let err = ops.consensus(&op(1.0, 0.0, 0.0), &op(0.0, 1.0, 0.0)).unwrap_err();
        assert_eq!(err, OpinionError::DegenerateConsensus);
    }

    #[test]
    fn test_consensus_on_a_list_requires_two_pairs() {
        let ops = ops();
        let pair = (op(1.0, 0.0, 0.0), op(0.5, 0.0, 0.5));
        assert!(matches!(
            ops.consensus_on_a_list(&[]),
            Err(OpinionError::Configuration(_))
        ));
        assert!(matches!(
            ops.consensus_on_a_list(&[pair]),
            Err(OpinionError::Configuration(_))
        ));
    }

    #[test]
    fn test_consensus_on_a_list_ignores_trust() {
        // Documented quirk: the trust half of each pair has no effect.
        let ops = ops();
        let w1 = op(0.5, 0.0, 0.5);
        let w2 = op(0.0, 0.5, 0.5);
        let trusting = ops
            .consensus_on_a_list(&[(op(1.0, 0.0, 0.0), w1), (op(1.0, 0.0, 0.0), w2)])
            .unwrap();
        let distrusting = ops
            .consensus_on_a_list(&[(op(0.0, 1.0, 0.0), w1), (op(0.0, 0.0, 1.0), w2)])
            .unwrap();
        assert_eq!(trusting, distrusting);
        assert_eq!(trusting, ops.consensus(&w1, &w2).unwrap());
    }

    #[test]
    fn test_consensus_on_a_list_folds_left() {
        let ops = ops();
        let t = op(1.0, 0.0, 0.0);
        let (w1, w2, w3) = (op(0.5, 0.0, 0.5), op(0.0, 0.5, 0.5), op(0.2, 0.2, 0.6));
        let folded = ops.consensus_on_a_list(&[(t, w1), (t, w2), (t, w3)]).unwrap();
        let manual = ops
            .consensus(&ops.consensus(&w1, &w2).unwrap(), &w3)
            .unwrap();
        assert_eq!(folded, manual);
    }

    #[test]
    fn test_graphical_merge_three_vertices() {
        let ops = ops();
        let (b, d, u) = (op(1.0, 0.0, 0.0), op(0.0, 1.0, 0.0), op(0.0, 0.0, 1.0));
        let merged = ops.graphical_discount_merge(&[(b, b), (b, u), (b, d)]).unwrap();
        assert_eq!(merged, op(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0));
    }

    #[test]
    fn test_graphical_merge_weights() {
        let ops = ops();
        // k = 1 for full belief, 1/2 for full uncertainty.
        let merged = ops
            .graphical_discount_merge(&[
                (op(1.0, 0.0, 0.0), op(1.0, 0.0, 0.0)),
                (op(0.0, 0.0, 1.0), op(0.0, 1.0, 0.0)),
            ])
            .unwrap();
        assert_eq!(merged, op(2.0 / 3.0, 1.0 / 3.0, 0.0));
    }

    #[test]
    fn test_graphical_merge_zero_weight() {
        let ops = ops();
        let d = op(0.0, 1.0, 0.0);
        let err = ops.graphical_discount_merge(&[(d, d), (d, d)]).unwrap_err();
        assert_eq!(err, OpinionError::ZeroWeight);
    }

    #[test]
    fn test_graphical_merge_requires_two_pairs() {
        let ops = ops();
        let b = op(1.0, 0.0, 0.0);
        assert!(matches!(
            ops.graphical_discount_merge(&[(b, b)]),
            Err(OpinionError::Configuration(_))
        ));
    }

    #[test]
    fn test_graphical_result_has_half_base_rate() {
        let ops = ops();
        let t = Opinion::new(0.5, 0.2, 0.3, 0.9, Tolerance::default()).unwrap();
        let c = Opinion::new(0.4, 0.4, 0.2, 0.1, Tolerance::default()).unwrap();
        for variant in [
            GraphicalVariant::Scaled,
            GraphicalVariant::Parallel,
            GraphicalVariant::Half,
        ] {
            assert_eq!(ops.graphical(variant, &t, &c).unwrap().base_rate(), 0.5);
        }
    }

    #[test]
    fn test_uai_referee() {
        let ops = ops();
        let t = op(0.5, 0.2, 0.3);
        let c = op(0.4, 0.4, 0.2);
        let result = ops.discount_uai_referee(&t, &c).unwrap();
        assert!((result.belief() - 0.2).abs() < 1e-12);
        assert!((result.disbelief() - 0.48).abs() < 1e-12);
        assert!((result.uncertainty() - 0.32).abs() < 1e-12);
        assert_eq!(result.base_rate(), 0.5);
    }
}
