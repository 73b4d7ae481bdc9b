//! Error types for the agent arena and the peer oracle.

use thiserror::Error;
use trustnet_opinion::OpinionError;

/// Result type alias for network operations.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Errors that can occur while building or querying a network.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    /// An agent with this name already exists in the network.
    #[error("duplicate agent: {0}")]
    DuplicateAgent(String),

    /// No agent with this name or index exists.
    #[error("unknown agent: {0}")]
    UnknownAgent(String),

    /// Truth-telling probability outside `[0, 1]`.
    #[error("invalid truthfulness for {agent}: {value} is not in [0, 1]")]
    InvalidProbability {
        /// Name of the agent being created.
        agent: String,
        /// Rejected probability.
        value: f64,
    },

    /// Opinion construction or an operator failed.
    #[error(transparent)]
    Opinion(#[from] OpinionError),
}
