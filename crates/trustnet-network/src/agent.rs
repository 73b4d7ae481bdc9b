//! Agents and their trust tables.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use trustnet_opinion::{Opinion, OpinionError, Tolerance};

/// Stable index of an agent inside its [`crate::Network`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub usize);

impl AgentId {
    /// Position in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The pair of opinions an agent holds about one trustee.
///
/// Exploration evaluates up to two operator configurations side by side;
/// `first` belongs to the first configuration and `second` to the second.
/// With a single configuration, or after bootstrapping, both are equal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrustEntry {
    /// Opinion derived with the first configuration.
    pub first: Opinion,
    /// Opinion derived with the second configuration.
    pub second: Opinion,
}

impl TrustEntry {
    /// Creates an entry from both slots.
    pub fn new(first: Opinion, second: Opinion) -> Self {
        Self { first, second }
    }

    /// Creates an entry with the same opinion in both slots.
    pub fn uniform(opinion: Opinion) -> Self {
        Self::new(opinion, opinion)
    }

    /// Opinion for configuration `slot` (0 or 1). Any other slot reads the second.
    pub fn slot(&self, slot: usize) -> Opinion {
        if slot == 0 {
            self.first
        } else {
            self.second
        }
    }
}

/// A member of the network.
///
/// Holds the private state the peer oracle reads (truthfulness and the
/// shared fact) and the state exploration grows (the trust table and the
/// set of agents already asked to reveal everything).
#[derive(Debug, Clone)]
pub struct Agent {
    id: AgentId,
    name: String,
    truthfulness: f64,
    pub(crate) fact: bool,
    pub(crate) neighbours: BTreeSet<AgentId>,
    pub(crate) trust: BTreeMap<AgentId, TrustEntry>,
    pub(crate) queried: BTreeSet<AgentId>,
}

impl Agent {
    pub(crate) fn new(id: AgentId, name: String, truthfulness: f64, fact: bool) -> Self {
        Self {
            id,
            name,
            truthfulness,
            fact,
            neighbours: BTreeSet::new(),
            trust: BTreeMap::new(),
            queried: BTreeSet::new(),
        }
    }

    /// Arena index.
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// Unique name within the network.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Probability of telling the truth on any single answer.
    pub fn truthfulness(&self) -> f64 {
        self.truthfulness
    }

    /// This agent's copy of the shared fact.
    pub fn fact(&self) -> bool {
        self.fact
    }

    /// Direct neighbours.
    pub fn neighbours(&self) -> &BTreeSet<AgentId> {
        &self.neighbours
    }

    /// Trust table, ordered by trustee.
    pub fn trust_table(&self) -> &BTreeMap<AgentId, TrustEntry> {
        &self.trust
    }

    /// Trustees in ascending order.
    pub fn trustees(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.trust.keys().copied()
    }

    /// Both opinions held about `other`, if any.
    pub fn opinion_about(&self, other: AgentId) -> Option<&TrustEntry> {
        self.trust.get(&other)
    }

    /// Agents this agent has already asked to reveal everything.
    pub fn queried(&self) -> &BTreeSet<AgentId> {
        &self.queried
    }

    /// The opinion a perfectly informed observer holds about this agent:
    /// `<p, 1 - p, 0, 1/2>`.
    pub fn ground_truth(&self, tolerance: Tolerance) -> Result<Opinion, OpinionError> {
        Opinion::new(self.truthfulness, 1.0 - self.truthfulness, 0.0, 0.5, tolerance)
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
