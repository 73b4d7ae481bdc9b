//! # Trustnet Core
//!
//! Unified facade for trust-propagation experiments.
//! Generates a network, bootstraps it, explores it and scores the result.
//!
//! ## Pipeline
//!
//! | Stage | Component | Produces |
//! |-------|-----------|----------|
//! | Generate | [`random_network`] | Agents with random truthfulness and links |
//! | Bootstrap | `trustnet_network::bootstrap_all` | Beta opinions about neighbours |
//! | Explore | `trustnet_explorer::Explorer` | Derived opinions about distant agents |
//! | Evaluate | [`Evaluation`] | Distances to the ground truth |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TRUSTNET CORE                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    ┌─────────────────┐                      │
//! │                    │    Trustnet     │  ← Unified Facade    │
//! │                    └────────┬────────┘                      │
//! │         ┌───────────────────┼───────────────────┐           │
//! │         ▼                   ▼                   ▼           │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐      │
//! │  │   Opinion   │    │   Network   │    │  Explorer   │      │
//! │  │   algebra   │    │  + oracle   │    │             │      │
//! │  └─────────────┘    └─────────────┘    └─────────────┘      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Notes
//!
//! - Every stage works on a copy, so a bootstrapped network can be explored
//!   again with other operators
//! - The whole run is reproducible from `global.seed`

mod config;
mod error;
mod evaluation;
mod generator;
mod trustnet;

pub use config::{BootstrapConfig, ExplorationConfig, GlobalConfig, NetworkConfig, TrustnetConfig};
pub use error::TrustnetError;
pub use evaluation::{AgentEvaluation, Evaluation, ScoreSummary, SlotScore};
pub use generator::random_network;
pub use trustnet::{RunOutcome, Trustnet};

// Re-export component types for convenience
pub use trustnet_explorer::{
    ConsensusKind, DiscountKind, ExplorationReport, OperatorConfiguration, OperatorPair,
};
pub use trustnet_network::{AgentId, Network, Topology, TrustEntry};
pub use trustnet_opinion::{Opinion, Tolerance};

/// Core result type for trustnet runs.
pub type Result<T> = std::result::Result<T, TrustnetError>;

#[cfg(test)]
mod tests;
