//! Configuration types for Trustnet.

use serde::{Deserialize, Serialize};
use std::path::Path;
use trustnet_explorer::OperatorConfiguration;
use trustnet_network::Topology;
use trustnet_opinion::{Tolerance, DEFAULT_EPSILON};

use crate::{error::TrustnetError, Result};

/// Configuration for one generate / bootstrap / explore run.
///
/// Every section falls back to its defaults, so a file only needs the keys
/// it overrides:
///
/// ```json
/// {
///   "network": { "agents": 20, "link_percentage": 15 },
///   "exploration": {
///     "agent": "Agent3",
///     "operators": [["josang", "josang_consensus"], ["aberdeen", "aberdeen_consensus"]]
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustnetConfig {
    /// Random network generation.
    pub network: NetworkConfig,

    /// Neighbour bootstrap.
    pub bootstrap: BootstrapConfig,

    /// Exploration settings.
    pub exploration: ExplorationConfig,

    /// Global settings.
    pub global: GlobalConfig,
}

/// Random network generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Number of agents, named `Agent0` .. `Agent{n-1}`.
    pub agents: usize,

    /// Chance in percent that an ordered pair of agents is linked.
    pub link_percentage: u32,

    /// Directed or symmetric neighbour edges.
    pub topology: Topology,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            agents: 50,
            link_percentage: 10,
            topology: Topology::Directed,
        }
    }
}

/// Neighbour bootstrap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Shared-fact questions asked of every neighbour.
    pub rounds: usize,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self { rounds: 10 }
    }
}

/// Exploration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorationConfig {
    /// Name of the exploring agent.
    pub agent: String,

    /// Discount and consensus pairs, validated while parsing.
    pub operators: OperatorConfiguration,
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self {
            agent: "Agent0".to_string(),
            operators: OperatorConfiguration::default(),
        }
    }
}

/// Global settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Numerical tolerance ε.
    pub epsilon: f64,

    /// Seed for network generation and the peer oracle.
    pub seed: u64,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            seed: 2013,
        }
    }
}

impl TrustnetConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates a JSON configuration file.
    ///
    /// # Errors
    /// - [`TrustnetError::Io`] if the file cannot be read
    /// - [`TrustnetError::Config`] if it does not parse or fails validation
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| TrustnetError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.network.agents == 0 {
            return Err(TrustnetError::Config("network needs at least one agent".into()));
        }
        if self.network.link_percentage > 100 {
            return Err(TrustnetError::Config(format!(
                "link_percentage must be at most 100, got {}",
                self.network.link_percentage
            )));
        }
        self.tolerance()?;
        if self.exploration.agent.is_empty() {
            return Err(TrustnetError::Config("exploring agent name is empty".into()));
        }
        Ok(())
    }

    /// Tolerance built from `global.epsilon`.
    ///
    /// # Errors
    /// [`TrustnetError::Config`] if ε is negative or not finite.
    pub fn tolerance(&self) -> Result<Tolerance> {
        Tolerance::try_from(self.global.epsilon).map_err(TrustnetError::Config)
    }

    /// Sets the number of agents.
    pub fn with_agents(mut self, agents: usize) -> Self {
        self.network.agents = agents;
        self
    }

    /// Sets the link percentage.
    pub fn with_link_percentage(mut self, percentage: u32) -> Self {
        self.network.link_percentage = percentage;
        self
    }

    /// Sets the topology.
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.network.topology = topology;
        self
    }

    /// Sets the bootstrap rounds per neighbour.
    pub fn with_bootstrap_rounds(mut self, rounds: usize) -> Self {
        self.bootstrap.rounds = rounds;
        self
    }

    /// Sets the exploring agent.
    pub fn with_explorer(mut self, agent: impl Into<String>) -> Self {
        self.exploration.agent = agent.into();
        self
    }

    /// Sets the operator configuration.
    pub fn with_operators(mut self, operators: OperatorConfiguration) -> Self {
        self.exploration.operators = operators;
        self
    }

    /// Sets ε.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.global.epsilon = epsilon;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.global.seed = seed;
        self
    }
}
