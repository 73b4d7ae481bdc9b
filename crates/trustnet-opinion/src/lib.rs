//! # Trustnet Opinion
//!
//! Subjective Logic opinions and the operator library that combines them.
//!
//! An opinion `<b, d, u, a>` generalises a probability with an explicit
//! uncertainty mass. Operators derive new opinions from trust in an
//! intermediary (discount) or from several independent sources (consensus).
//!
//! ## Components
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`Opinion`] | Immutable, invariant-checked 4-tuple |
//! | [`Tolerance`] | Explicit ε for checks and comparisons |
//! | [`OperatorLibrary`] | Discount, consensus and graphical operators |
//! | [`RandomSource`] | Injectable uniform sampler |
//! | [`InteractionHistory`] | Beta bootstrap from interaction counts |
//!
//! ## Opinion Triangle
//!
//! ```text
//!                   U  <0, 0, 1>
//!                  /\
//!                 /  \
//!                / .o \      o = <b, d, u>
//!               /      \
//!   <1, 0, 0>  B________D  <0, 1, 0>
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use trustnet_opinion::{OperatorLibrary, Opinion, Tolerance};
//!
//! let tol = Tolerance::default();
//! let ops = OperatorLibrary::new(tol);
//!
//! let trust = Opinion::new(0.8, 0.1, 0.1, 0.5, tol)?;
//! let report = Opinion::new(0.6, 0.2, 0.2, 0.5, tol)?;
//!
//! let derived = ops.discount(&trust, &report)?;
//! assert!(derived.uncertainty() > report.uncertainty());
//! # Ok::<(), trustnet_opinion::OpinionError>(())
//! ```
//!
//! ## References
//!
//! - Jøsang, A. (2001). "A Logic for Uncertain Probabilities"
//!   *International Journal of Uncertainty, Fuzziness and Knowledge-Based
//!   Systems*, 9(3), 279-311.
//! - Cerutti, F., Toniolo, A., Oren, N., Norman, T. J. (2013).
//!   "Context-dependent trust decisions with subjective logic"

mod error;
mod geometry;
mod history;
mod operators;
mod opinion;
mod random;
mod tolerance;

pub use error::{OpinionError, Result};
pub use geometry::SIXTY_DEGREES;
pub use history::InteractionHistory;
pub use operators::{AngleStrategy, GraphicalVariant, OperatorLibrary, TrustPair};
pub use opinion::Opinion;
pub use random::{
    random_opinion, random_opinion_different, RandomSource, SeededRandom, SequenceRandom,
    MAX_DRAWS,
};
pub use tolerance::{Tolerance, DEFAULT_EPSILON};
