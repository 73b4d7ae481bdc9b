//! # Trustnet Explorer
//!
//! Breadth-first trust propagation over a peer network.
//!
//! An agent starts from opinions about its direct trustees, asks each of them
//! to reveal everything they know, and derives opinions about the agents they
//! mention by discounting every report with its trust in the reporter. When
//! several reporters mention the same agent, their discounted opinions are
//! merged with a consensus operator.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                    Explorer                      │
//! │  known / asked sets, one round per BFS layer     │
//! ├────────────────────────┬─────────────────────────┤
//! │  Oracle::query         │  OperatorConfiguration  │
//! │  (trustnet-network)    │  discount + consensus   │
//! │                        │  (trustnet-opinion)     │
//! └────────────────────────┴─────────────────────────┘
//! ```
//!
//! ## Components
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`Explorer`] | Fixed-point exploration for one agent |
//! | [`OperatorConfiguration`] | One or two `(discount, consensus)` pairs |
//! | [`ExplorationReport`] | Rounds, queries and discovered agents |
//!
//! ## Notes
//!
//! - Configuration is validated before any oracle query is issued
//! - A responder naming an agent it does not know aborts the run
//! - Algebra failures are fatal and never retried

mod config;
mod error;
mod explorer;

pub use config::{ConsensusKind, DiscountKind, OperatorConfiguration, OperatorPair};
pub use error::{ExplorerError, Result};
pub use explorer::{ExplorationReport, Explorer};
