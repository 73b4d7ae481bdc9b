//! Projection of opinions onto the opinion triangle.
//!
//! The `(b, d, u)` simplex is drawn as an equilateral triangle with the
//! belief vertex at the origin, the disbelief vertex on the x axis and the
//! uncertainty vertex at the apex. The graphical operators work on the angles
//! and lengths defined here.
//!
//! ```text
//!                 U (apex)
//!                /\
//!               /  \
//!              /    \
//!             /      \
//!          B /________\ D
//! ```

use std::f64::consts::{FRAC_PI_3, PI};

use crate::opinion::Opinion;

/// Sixty degrees, in radians.
pub const SIXTY_DEGREES: f64 = FRAC_PI_3;

impl Opinion {
    /// Cartesian x coordinate: `(d + u·cos60°) / sin60°`.
    pub fn x_cartesian(&self) -> f64 {
        (self.disbelief() + self.uncertainty() * SIXTY_DEGREES.cos()) / SIXTY_DEGREES.sin()
    }

    /// Cartesian y coordinate: `u`.
    pub fn y_cartesian(&self) -> f64 {
        self.uncertainty()
    }

    /// Angle at the belief vertex between the base and this opinion.
    ///
    /// Zero for full belief, where the ratio would be `0/0`.
    pub fn angle_alpha(&self) -> f64 {
        if self.tolerance().is_one(self.belief()) {
            return 0.0;
        }
        ((self.uncertainty() * SIXTY_DEGREES.sin())
            / (self.disbelief() + self.uncertainty() * SIXTY_DEGREES.cos()))
        .atan()
    }

    /// Angle at the disbelief vertex between the base and this opinion.
    ///
    /// Sixty degrees for full disbelief.
    pub fn angle_beta(&self) -> f64 {
        if self.tolerance().is_one(self.disbelief()) {
            return SIXTY_DEGREES;
        }
        ((self.uncertainty() * SIXTY_DEGREES.sin())
            / (1.0 - (self.disbelief() + self.uncertainty() * SIXTY_DEGREES.cos())))
        .atan()
    }

    /// `60° - β`.
    pub fn angle_gamma(&self) -> f64 {
        SIXTY_DEGREES - self.angle_beta()
    }

    /// Angle at the uncertainty apex; zero for full uncertainty.
    pub fn angle_delta(&self) -> f64 {
        if self.tolerance().is_one(self.uncertainty()) {
            return 0.0;
        }
        // Rounding can push the ratio a hair above one.
        (self.belief() / self.length_to_uncertainty())
            .clamp(-1.0, 1.0)
            .asin()
    }

    /// `180° - γ - δ`.
    pub fn angle_epsilon(&self) -> f64 {
        PI - self.angle_gamma() - self.angle_delta()
    }

    /// Distance from this opinion to the uncertainty apex.
    pub fn length_to_uncertainty(&self) -> f64 {
        ((1.0 / 3.0) * (1.0 + self.disbelief() - self.uncertainty()).powi(2)
            + self.belief().powi(2))
        .sqrt()
    }

    /// x coordinate where the ray from the belief vertex through this opinion
    /// leaves the triangle.
    pub fn max_x_cartesian(&self) -> f64 {
        let tan_alpha = self.angle_alpha().tan();
        (2.0 - self.y_cartesian() + tan_alpha * self.x_cartesian()) / (tan_alpha + 3f64.sqrt())
    }

    /// y coordinate paired with [`Opinion::max_x_cartesian`].
    pub fn max_y_cartesian(&self) -> f64 {
        -3f64.sqrt() * self.x_cartesian() + 2.0
    }

    /// Length of this opinion's vector over the maximum length along the same
    /// direction. Scales the graphical combinations.
    pub fn magnitude_ratio(&self) -> f64 {
        self.x_cartesian().hypot(self.y_cartesian())
            / self.max_x_cartesian().hypot(self.max_y_cartesian())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tolerance;

    const EPS: f64 = 1e-12;

    fn op(b: f64, d: f64, u: f64) -> Opinion {
        Opinion::new(b, d, u, 0.5, Tolerance::default()).unwrap()
    }

    #[test]
    fn test_vertices_cartesian() {
        let b = Opinion::full_belief(Tolerance::default());
        assert!(b.x_cartesian().abs() < EPS);
        assert!(b.y_cartesian().abs() < EPS);

        let u = Opinion::full_uncertainty(Tolerance::default());
        assert!((u.x_cartesian() - 1.0 / 3f64.sqrt()).abs() < EPS);
        assert!((u.y_cartesian() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_alpha_guarded_at_full_belief() {
        let b = Opinion::full_belief(Tolerance::default());
        assert_eq!(b.angle_alpha(), 0.0);
    }

    #[test]
    fn test_alpha_of_vertices() {
        let d = Opinion::full_disbelief(Tolerance::default());
        let u = Opinion::full_uncertainty(Tolerance::default());
        assert!(d.angle_alpha().abs() < EPS);
        assert!((u.angle_alpha() - SIXTY_DEGREES).abs() < EPS);
    }

    #[test]
    fn test_beta_guarded_at_full_disbelief() {
        let d = Opinion::full_disbelief(Tolerance::default());
        assert_eq!(d.angle_beta(), SIXTY_DEGREES);
        assert!(d.angle_gamma().abs() < EPS);
    }

    #[test]
    fn test_delta_guarded_at_full_uncertainty() {
        let u = Opinion::full_uncertainty(Tolerance::default());
        assert_eq!(u.angle_delta(), 0.0);
    }

    #[test]
    fn test_full_belief_angles() {
        let b = Opinion::full_belief(Tolerance::default());
        assert!(b.angle_beta().abs() < EPS);
        assert!((b.angle_gamma() - SIXTY_DEGREES).abs() < EPS);
        assert!((b.angle_delta() - SIXTY_DEGREES).abs() < EPS);
        assert!((b.angle_epsilon() - SIXTY_DEGREES).abs() < EPS);
    }

    #[test]
    fn test_length_to_uncertainty() {
        let b = Opinion::full_belief(Tolerance::default());
        assert!((b.length_to_uncertainty() - (4.0f64 / 3.0).sqrt()).abs() < EPS);
        let u = Opinion::full_uncertainty(Tolerance::default());
        assert!(u.length_to_uncertainty().abs() < EPS);
    }

    #[test]
    fn test_magnitude_ratio_bounds() {
        assert!(Opinion::full_belief(Tolerance::default()).magnitude_ratio().abs() < EPS);
        let third = op(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0);
        let ratio = third.magnitude_ratio();
        assert!(ratio > 0.0 && ratio < 1.0);
    }
}
