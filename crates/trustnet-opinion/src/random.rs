//! Injectable randomness and random opinion sampling.
//!
//! Nothing in the workspace draws from an ambient generator. Every consumer
//! takes a [`RandomSource`], so runs are reproducible from a seed and tests
//! can replay a fixed sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::opinion::Opinion;
use crate::tolerance::Tolerance;

/// A source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    /// Draws the next sample.
    fn uniform(&mut self) -> f64;
}

/// Seeded pseudo-random source.
///
/// # Example
///
/// ```rust
/// use trustnet_opinion::{RandomSource, SeededRandom};
///
/// let mut a = SeededRandom::new(42);
/// let mut b = SeededRandom::new(42);
/// assert_eq!(a.uniform(), b.uniform());
/// ```
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Creates a source from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed sequence of samples, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    samples: Vec<f64>,
    position: usize,
}

impl SequenceRandom {
    /// Creates a source replaying `samples`.
    ///
    /// # Panics
    /// Panics if `samples` is empty or holds a value outside `[0, 1)`.
    pub fn new(samples: Vec<f64>) -> Self {
        assert!(!samples.is_empty(), "SequenceRandom needs at least one sample");
        assert!(
            samples.iter().all(|s| (0.0..1.0).contains(s)),
            "Samples must lie in [0, 1)"
        );
        Self {
            samples,
            position: 0,
        }
    }

    /// A source that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandom {
    fn uniform(&mut self) -> f64 {
        let sample = self.samples[self.position % self.samples.len()];
        self.position += 1;
        sample
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }
}

/// Rejection-sampling attempts before a sampler falls back to a deterministic answer.
pub const MAX_DRAWS: usize = 64;

/// Samples a valid opinion with base rate one half.
///
/// Draws `(r1, r2)` until `r1 + r2 < 1`, then returns `<r1, r2, 1 - r1 - r2, 1/2>`.
/// After [`MAX_DRAWS`] rejected pairs the last pair is reflected to
/// `(1 - r1, 1 - r2)`, which always lies in the triangle, so a source stuck
/// above one half still terminates.
pub fn random_opinion<R: RandomSource + ?Sized>(rng: &mut R, tolerance: Tolerance) -> Opinion {
    let (mut r1, mut r2) = (0.0, 0.0);
    for _ in 0..MAX_DRAWS {
        r1 = rng.uniform();
        r2 = rng.uniform();
        if r1 + r2 < 1.0 {
            if let Ok(opinion) = Opinion::new(r1, r2, 1.0 - (r1 + r2), 0.5, tolerance) {
                return opinion;
            }
        }
    }

    let (b, d) = (1.0 - r1, 1.0 - r2);
    Opinion::new(b, d, (1.0 - (b + d)).max(0.0), 0.5, tolerance)
        .unwrap_or_else(|_| Opinion::full_uncertainty(tolerance))
}

/// Samples a valid opinion that is not equal to `other`.
///
/// After [`MAX_DRAWS`] samples equal to `other`, returns the first of full
/// uncertainty, full belief and full disbelief that differs from it.
pub fn random_opinion_different<R: RandomSource + ?Sized>(
    rng: &mut R,
    other: &Opinion,
    tolerance: Tolerance,
) -> Opinion {
    for _ in 0..MAX_DRAWS {
        let candidate = random_opinion(rng, tolerance);
        if candidate != *other {
            return candidate;
        }
    }

    let uncertain = Opinion::full_uncertainty(tolerance);
    if uncertain != *other {
        uncertain
    } else {
        Opinion::full_belief(tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SeededRandom::new(7);
        let mut b = SeededRandom::new(7);
        for _ in 0..10 {
            assert_eq!(a.uniform(), b.uniform());
        }
    }

    #[test]
    fn test_seeded_in_range() {
        let mut rng = SeededRandom::new(1);
        for _ in 0..1000 {
            let s = rng.uniform();
            assert!((0.0..1.0).contains(&s));
        }
    }

    #[test]
    fn test_sequence_cycles() {
        let mut rng = SequenceRandom::new(vec![0.1, 0.2]);
        assert_eq!(rng.uniform(), 0.1);
        assert_eq!(rng.uniform(), 0.2);
        assert_eq!(rng.uniform(), 0.1);
    }

    #[test]
    #[should_panic(expected = "Samples must lie in [0, 1)")]
    fn test_sequence_rejects_out_of_range() {
        SequenceRandom::new(vec![1.0]);
    }

    #[test]
    fn test_random_opinion_rejects_until_simplex() {
        // (0.7, 0.6) is rejected, (0.2, 0.3) accepted.
        let mut rng = SequenceRandom::new(vec![0.7, 0.6, 0.2, 0.3]);
        let op = random_opinion(&mut rng, Tolerance::default());
        assert_eq!(op.belief(), 0.2);
        assert_eq!(op.disbelief(), 0.3);
        assert!((op.uncertainty() - 0.5).abs() < 1e-12);
        assert_eq!(op.base_rate(), 0.5);
    }

    #[test]
    fn test_random_opinion_different() {
        let tol = Tolerance::default();
        let same = Opinion::new(0.2, 0.3, 0.5, 0.5, tol).unwrap();
        let mut rng = SequenceRandom::new(vec![0.2, 0.3, 0.1, 0.1]);
        let op = random_opinion_different(&mut rng, &same, tol);
        assert_ne!(op, same);
        assert_eq!(op.belief(), 0.1);
    }

    #[test]
    fn test_stuck_source_terminates_by_reflection() {
        let tol = Tolerance::default();
        let op = random_opinion(&mut SequenceRandom::constant(0.9), tol);
        assert_eq!(op, Opinion::new(0.1, 0.1, 0.8, 0.5, tol).unwrap());

        let edge = random_opinion(&mut SequenceRandom::constant(0.5), tol);
        assert_eq!(edge, Opinion::new(0.5, 0.5, 0.0, 0.5, tol).unwrap());
    }

    #[test]
    fn test_stuck_source_still_yields_a_different_opinion() {
        let tol = Tolerance::default();
        let same = Opinion::new(0.2, 0.2, 0.6, 0.5, tol).unwrap();
        let op = random_opinion_different(&mut SequenceRandom::constant(0.2), &same, tol);
        assert_eq!(op, Opinion::full_uncertainty(tol));

        let vacuous = Opinion::full_uncertainty(tol);
        let op = random_opinion_different(&mut SequenceRandom::constant(0.0), &vacuous, tol);
        assert_eq!(op, Opinion::full_belief(tol));
    }

    #[test]
    fn test_random_opinions_are_valid() {
        let tol = Tolerance::default();
        let mut rng = SeededRandom::new(99);
        for _ in 0..500 {
            let op = random_opinion(&mut rng, tol);
            assert!(op.holds_under(tol));
        }
    }
}
