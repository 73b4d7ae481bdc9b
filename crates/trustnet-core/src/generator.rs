//! Random network generation.

use tracing::debug;
use trustnet_network::{AgentId, Network};
use trustnet_opinion::RandomSource;

use crate::{config::NetworkConfig, Result};

/// Builds a network of `config.agents` agents named `Agent0`, `Agent1`, ...
///
/// Each agent draws its truthfulness uniformly from `[0, 1)`. Every ordered
/// pair of distinct agents is then linked when `floor(100 * r)` falls below
/// the link percentage. With a symmetric topology a link in either direction
/// makes both agents neighbours.
pub fn random_network<R: RandomSource + ?Sized>(
    name: &str,
    config: &NetworkConfig,
    rng: &mut R,
) -> Result<Network> {
    let mut network = Network::new(name, config.topology);
    let ids = (0..config.agents)
        .map(|i| network.add_agent(format!("Agent{}", i), rng.uniform()))
        .collect::<std::result::Result<Vec<AgentId>, _>>()?;

    let mut links = 0usize;
    for &from in &ids {
        for &to in &ids {
            if from != to && (rng.uniform() * 100.0).floor() < f64::from(config.link_percentage) {
                network.connect(from, to)?;
                links += 1;
            }
        }
    }

    debug!(
        "Generated {} with {} agents and {} links",
        name,
        ids.len(),
        links
    );
    Ok(network)
}
