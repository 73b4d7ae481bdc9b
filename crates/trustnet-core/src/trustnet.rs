//! The unified Trustnet facade.
//!
//! [`Trustnet`] drives one experiment: generate a random network, bootstrap
//! every agent's opinions about its neighbours, let one agent explore, and
//! score what it learnt against the ground truth. Each stage works on its own
//! copy of the network, so the bootstrapped network can be explored again
//! with other operators.

use tracing::info;
use trustnet_explorer::{ExplorationReport, Explorer, OperatorConfiguration};
use trustnet_network::{bootstrap_all, Network, PeerOracle};
use trustnet_opinion::{OperatorLibrary, SeededRandom, Tolerance};

use crate::{config::TrustnetConfig, evaluation::Evaluation, generator::random_network, Result};

/// Everything one exploration produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Explored copy of the network.
    pub network: Network,
    /// Rounds, queries and discovered agents.
    pub report: ExplorationReport,
    /// Ground-truth scores of the explorer's table.
    pub evaluation: Evaluation,
}

/// Experiment driver.
///
/// # Example
///
/// ```rust
/// use trustnet_core::{Trustnet, TrustnetConfig};
///
/// let config = TrustnetConfig::default()
///     .with_agents(8)
///     .with_link_percentage(40)
///     .with_bootstrap_rounds(5);
///
/// let mut trustnet = Trustnet::new(config)?;
/// let outcome = trustnet.run()?;
/// assert_eq!(outcome.evaluation.agents.len(), 7);
/// # Ok::<(), trustnet_core::TrustnetError>(())
/// ```
pub struct Trustnet {
    /// Configuration.
    config: TrustnetConfig,

    /// Tolerance built from the configuration.
    tolerance: Tolerance,

    /// Operators shared by bootstrap and exploration.
    operators: OperatorLibrary,

    /// Seeded source for generation and the peer oracle.
    rng: SeededRandom,
}

impl Trustnet {
    /// Creates a driver from a validated configuration.
    ///
    /// # Errors
    /// Returns [`crate::TrustnetError::Config`] if the configuration is invalid.
    pub fn new(config: TrustnetConfig) -> Result<Self> {
        config.validate()?;
        let tolerance = config.tolerance()?;

        info!(
            "Trustnet initialized: {} agents, {}% links, seed {}",
            config.network.agents, config.network.link_percentage, config.global.seed
        );

        Ok(Self {
            tolerance,
            operators: OperatorLibrary::new(tolerance),
            rng: SeededRandom::new(config.global.seed),
            config,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &TrustnetConfig {
        &self.config
    }

    /// Generates a random network from the `network` section.
    pub fn generate(&mut self) -> Result<Network> {
        random_network("generated", &self.config.network, &mut self.rng)
    }

    /// Bootstraps every agent's neighbours on a copy of `network`.
    pub fn bootstrap(&mut self, network: &Network) -> Result<Network> {
        let mut copy = network.cloned(format!("{} (bootstrapped)", network.name()));
        let mut oracle = PeerOracle::new(&mut self.rng, self.tolerance);
        bootstrap_all(&mut copy, &mut oracle, self.config.bootstrap.rounds, self.tolerance)?;
        info!(
            "Bootstrapped {} agents with {} rounds per neighbour",
            copy.len(),
            self.config.bootstrap.rounds
        );
        Ok(copy)
    }

    /// Explores a copy of `network` with the configured agent and operators.
    pub fn explore(&mut self, network: &Network) -> Result<RunOutcome> {
        let operators = self.config.exploration.operators.clone();
        self.explore_with(network, operators)
    }

    /// Explores a copy of `network` with the configured agent and `operators`.
    pub fn explore_with(
        &mut self,
        network: &Network,
        operators: OperatorConfiguration,
    ) -> Result<RunOutcome> {
        let mut copy = network.cloned(format!("{} (explored)", network.name()));
        let agent = copy.id_of(&self.config.exploration.agent)?;
        let slots = operators.len();

        let explorer = Explorer::new(agent, operators, self.operators);
        let mut oracle = PeerOracle::new(&mut self.rng, self.tolerance);
        let report = explorer.explore(&mut copy, &mut oracle)?;
        let evaluation = Evaluation::of(&copy, agent, slots, self.tolerance)?;

        Ok(RunOutcome {
            network: copy,
            report,
            evaluation,
        })
    }

    /// Generate, bootstrap and explore in one go.
    pub fn run(&mut self) -> Result<RunOutcome> {
        let generated = self.generate()?;
        let bootstrapped = self.bootstrap(&generated)?;
        self.explore(&bootstrapped)
    }
}
