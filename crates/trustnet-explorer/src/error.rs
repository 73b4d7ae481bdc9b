//! Error types for trust exploration.

use thiserror::Error;
use trustnet_network::NetworkError;
use trustnet_opinion::OpinionError;

/// Result type alias for exploration.
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Errors that can occur while configuring or running an exploration.
///
/// All of them are fatal to the run. Algebraic failures point at the data or
/// the configuration and are reported to the caller, never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExplorerError {
    /// Unknown operator name, wrong arity, or a merge the configuration
    /// cannot perform.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The oracle reported a trustee the responder holds no opinion about.
    #[error("oracle contract violated: {responder} reported unknown trustee {trustee}")]
    OracleContractViolation {
        /// Agent whose answer was inspected.
        responder: String,
        /// Trustee it claimed to know.
        trustee: String,
    },

    /// The explorer holds no opinion about an intermediary it relied on.
    #[error("{truster} holds no opinion about intermediary {trustee}")]
    MissingTrust {
        /// Exploring agent.
        truster: String,
        /// Intermediary without a trust entry.
        trustee: String,
    },

    /// Network lookup or oracle failure.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Operator failure.
    #[error(transparent)]
    Opinion(#[from] OpinionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_violation_display() {
        let err = ExplorerError::OracleContractViolation {
            responder: "B".to_string(),
            trustee: "Z".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "oracle contract violated: B reported unknown trustee Z"
        );
    }

    #[test]
    fn test_transparent_opinion_error() {
        let err: ExplorerError = OpinionError::DegenerateConsensus.into();
        assert_eq!(err.to_string(), OpinionError::DegenerateConsensus.to_string());
    }
}
