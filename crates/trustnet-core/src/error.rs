//! Error types for Trustnet Core.

use thiserror::Error;

/// Core error type for trustnet runs.
#[derive(Debug, Error)]
pub enum TrustnetError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Opinion algebra error passthrough.
    #[error("Opinion error: {0}")]
    Opinion(#[from] trustnet_opinion::OpinionError),

    /// Network error passthrough.
    #[error("Network error: {0}")]
    Network(#[from] trustnet_network::NetworkError),

    /// Exploration error passthrough.
    #[error("Exploration error: {0}")]
    Explorer(#[from] trustnet_explorer::ExplorerError),
}
