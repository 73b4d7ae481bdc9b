//! The agent arena.
//!
//! Agents live in a `Vec` and refer to each other by [`AgentId`]. Adjacency
//! and trust tables are index-keyed, so the graph has no shared or cyclic
//! ownership and cloning a network is a plain deep copy.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::agent::{Agent, AgentId, TrustEntry};
use crate::error::{NetworkError, Result};
use crate::oracle::{Answer, InteractionRecord, Question};

/// Value of the shared fact every agent starts with.
pub const SHARED_FACT: bool = true;

/// How [`Network::connect`] records an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// `connect(a, b)` adds `b` to `a`'s neighbours only.
    #[default]
    Directed,
    /// `connect(a, b)` adds the edge in both directions.
    Symmetric,
}

/// The three operations exploration needs from a network store.
pub trait NetworkStore {
    /// Looks an agent up by name.
    fn get_agent_by_name(&self, name: &str) -> Option<&Agent>;

    /// All agents in index order.
    fn list_agents(&self) -> Vec<&Agent>;

    /// Replaces `target`'s contents with a deep copy of this store's agents,
    /// neighbour edges and trust entries.
    fn clone_to(&self, target: &mut Self);
}

/// An arena of agents.
///
/// # Example
///
/// ```rust
/// use trustnet_network::{Network, Topology};
///
/// let mut net = Network::new("demo", Topology::Symmetric);
/// let a = net.add_agent("A", 0.9)?;
/// let b = net.add_agent("B", 0.4)?;
/// net.connect(a, b)?;
///
/// assert!(net.agent(b)?.neighbours().contains(&a));
/// # Ok::<(), trustnet_network::NetworkError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Network {
    name: String,
    topology: Topology,
    agents: Vec<Agent>,
    by_name: HashMap<String, AgentId>,
    interactions: Vec<InteractionRecord>,
}

impl Network {
    /// Creates an empty network.
    pub fn new(name: impl Into<String>, topology: Topology) -> Self {
        Self {
            name: name.into(),
            topology,
            ..Self::default()
        }
    }

    /// Network name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Edge policy.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Number of agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Returns true if the network has no agents.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Adds an agent holding the shared fact.
    ///
    /// # Errors
    /// - [`NetworkError::InvalidProbability`] if `truthfulness` is not in `[0, 1]`
    /// - [`NetworkError::DuplicateAgent`] if the name is taken
    pub fn add_agent(&mut self, name: impl Into<String>, truthfulness: f64) -> Result<AgentId> {
        let name = name.into();
        if !(0.0..=1.0).contains(&truthfulness) {
            return Err(NetworkError::InvalidProbability {
                agent: name,
                value: truthfulness,
            });
        }
        if self.by_name.contains_key(&name) {
            return Err(NetworkError::DuplicateAgent(name));
        }

        let id = AgentId(self.agents.len());
        self.by_name.insert(name.clone(), id);
        self.agents
            .push(Agent::new(id, name, truthfulness, SHARED_FACT));
        Ok(id)
    }

    /// Looks an agent up by index.
    pub fn agent(&self, id: AgentId) -> Result<&Agent> {
        self.agents
            .get(id.index())
            .ok_or_else(|| NetworkError::UnknownAgent(id.to_string()))
    }

    fn agent_mut(&mut self, id: AgentId) -> Result<&mut Agent> {
        self.agents
            .get_mut(id.index())
            .ok_or_else(|| NetworkError::UnknownAgent(id.to_string()))
    }

    /// Looks an agent's index up by name.
    pub fn id_of(&self, name: &str) -> Result<AgentId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| NetworkError::UnknownAgent(name.to_string()))
    }

    /// Name of an agent, or its index when unknown. For logs and reports.
    pub fn label(&self, id: AgentId) -> String {
        self.agent(id)
            .map(|a| a.name().to_string())
            .unwrap_or_else(|_| id.to_string())
    }

    /// Agents in index order.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    /// Adds a neighbour edge according to the topology.
    pub fn connect(&mut self, from: AgentId, to: AgentId) -> Result<()> {
        self.agent(to)?;
        self.agent_mut(from)?.neighbours.insert(to);
        if self.topology == Topology::Symmetric {
            self.agent_mut(to)?.neighbours.insert(from);
        }
        Ok(())
    }

    /// Overrides an agent's copy of the shared fact.
    pub fn set_fact(&mut self, id: AgentId, fact: bool) -> Result<()> {
        let agent = self.agent_mut(id)?;
        agent.fact = fact;
        Ok(())
    }

    /// Records `truster`'s opinions about `trustee`, replacing any previous entry.
    pub fn set_trust(&mut self, truster: AgentId, trustee: AgentId, entry: TrustEntry) -> Result<()> {
        self.agent(trustee)?;
        let agent = self.agent_mut(truster)?;
        if agent.trust.insert(trustee, entry).is_some() {
            debug!("Trust entry {} -> {} overwritten", truster, trustee);
        }
        Ok(())
    }

    /// `truster`'s opinions about `trustee`.
    pub fn trust(&self, truster: AgentId, trustee: AgentId) -> Result<Option<&TrustEntry>> {
        Ok(self.agent(truster)?.opinion_about(trustee))
    }

    /// Remembers that `asker` has asked `responder` to reveal everything.
    pub fn mark_queried(&mut self, asker: AgentId, responder: AgentId) -> Result<()> {
        self.agent(responder)?;
        self.agent_mut(asker)?.queried.insert(responder);
        Ok(())
    }

    /// Appends to the interaction log.
    pub fn record_interaction(
        &mut self,
        asker: AgentId,
        responder: AgentId,
        question: Question,
        answer: Answer,
    ) -> Result<()> {
        self.agent(asker)?;
        self.agent(responder)?;
        self.interactions.push(InteractionRecord {
            asker,
            responder,
            question,
            answer,
        });
        Ok(())
    }

    /// Every interaction recorded so far, oldest first.
    pub fn interactions(&self) -> &[InteractionRecord] {
        &self.interactions
    }

    /// Deep copy under a new name. Interaction log and queried sets are not
    /// carried over, so the copy starts a fresh run.
    pub fn cloned(&self, name: impl Into<String>) -> Network {
        let mut copy = Network::new(name, self.topology);
        self.clone_to(&mut copy);
        copy
    }
}

impl NetworkStore for Network {
    fn get_agent_by_name(&self, name: &str) -> Option<&Agent> {
        self.by_name.get(name).and_then(|id| self.agents.get(id.index()))
    }

    fn list_agents(&self) -> Vec<&Agent> {
        self.agents.iter().collect()
    }

    fn clone_to(&self, target: &mut Self) {
        target.topology = self.topology;
        target.by_name = self.by_name.clone();
        target.interactions.clear();
        target.agents = self
            .agents
            .iter()
            .map(|agent| {
                let mut copy = Agent::new(
                    agent.id(),
                    agent.name().to_string(),
                    agent.truthfulness(),
                    agent.fact(),
                );
                copy.neighbours = agent.neighbours.clone();
                copy.trust = agent.trust.clone();
                copy
            })
            .collect();
    }
}
