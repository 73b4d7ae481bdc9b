//! # Trustnet Network
//!
//! Agent arena, trust tables and the peer oracle.
//!
//! Agents are addressed by [`AgentId`] inside a [`Network`]. Each agent holds
//! a truth-telling probability, a copy of a shared fact, its neighbours and a
//! trust table mapping trustees to a [`TrustEntry`]. Agents learn about each
//! other only by asking through an [`Oracle`].
//!
//! ## Components
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`Network`] | Arena of agents implementing [`NetworkStore`] |
//! | [`PeerOracle`] | Honest-or-lying answers driven by a [`trustnet_opinion::RandomSource`] |
//! | [`know_your_neighbours`] | Beta bootstrap of opinions about neighbours |
//!
//! ## Quick Start
//!
//! ```rust
//! use trustnet_network::{know_your_neighbours, Network, PeerOracle, Topology};
//! use trustnet_opinion::{SeededRandom, Tolerance};
//!
//! let tol = Tolerance::default();
//! let mut net = Network::new("demo", Topology::Directed);
//! let a = net.add_agent("A", 1.0)?;
//! let b = net.add_agent("B", 0.8)?;
//! net.connect(a, b)?;
//!
//! let mut oracle = PeerOracle::new(SeededRandom::new(7), tol);
//! know_your_neighbours(&mut net, &mut oracle, a, 10, tol)?;
//!
//! assert!(net.trust(a, b)?.is_some());
//! # Ok::<(), trustnet_network::NetworkError>(())
//! ```

mod agent;
mod bootstrap;
mod error;
mod network;
mod oracle;

pub use agent::{Agent, AgentId, TrustEntry};
pub use bootstrap::{bootstrap_all, know_your_neighbours};
pub use error::{NetworkError, Result};
pub use network::{Network, NetworkStore, Topology, SHARED_FACT};
pub use oracle::{Answer, InteractionRecord, Oracle, PeerOracle, Question, Report};
