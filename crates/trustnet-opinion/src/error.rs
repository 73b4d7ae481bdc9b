//! Error types for opinion construction and the operator library.
//!
//! Every error here is fatal to the call that raised it. The algebra has no
//! retry policy: a failure means the inputs or the configuration are wrong,
//! not that something transient happened.

use thiserror::Error;

/// Result type alias for opinion operations.
pub type Result<T> = std::result::Result<T, OpinionError>;

/// Errors that can occur while building or combining opinions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OpinionError {
    /// The 4-tuple violates the range or sum invariant beyond the tolerance.
    #[error("not a valid opinion: <{belief}, {disbelief}, {uncertainty}, {base_rate}>")]
    InvalidOpinion {
        /// Rejected belief mass.
        belief: f64,
        /// Rejected disbelief mass.
        disbelief: f64,
        /// Rejected uncertainty mass.
        uncertainty: f64,
        /// Rejected base rate.
        base_rate: f64,
    },

    /// An operator received an opinion that does not hold under its tolerance.
    #[error("invalid operand: {0}")]
    InvalidOperand(String),

    /// Pairwise consensus with two dogmatic opinions (`u1 + u2 - u1*u2 == 0`).
    #[error("consensus undefined: both opinions have zero uncertainty")]
    DegenerateConsensus,

    /// Malformed operator input, e.g. fewer than two pairs for an N-ary merge.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The graphical merge weights sum to zero.
    #[error("graphical merge has zero total weight")]
    ZeroWeight,

    /// Interaction counts must be non-negative.
    #[error("invalid interaction history: {successes} successes, {failures} failures")]
    InvalidHistory {
        /// Number of positive interactions.
        successes: i64,
        /// Number of negative interactions.
        failures: i64,
    },
}
