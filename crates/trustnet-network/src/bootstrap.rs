//! Pre-exploration bootstrap of opinions about direct neighbours.

use tracing::debug;
use trustnet_opinion::{InteractionHistory, Tolerance};

use crate::agent::{AgentId, TrustEntry};
use crate::error::Result;
use crate::network::Network;
use crate::oracle::{Answer, Oracle, Question};

/// Builds `agent`'s trust entries for each of its neighbours.
///
/// Every neighbour is asked the shared-fact question `rounds` times. Answers
/// that agree with the agent's own fact count as successes, the rest as
/// failures, and the beta bootstrap of those counts becomes the entry (both
/// slots equal).
pub fn know_your_neighbours<O: Oracle + ?Sized>(
    network: &mut Network,
    oracle: &mut O,
    agent: AgentId,
    rounds: usize,
    tolerance: Tolerance,
) -> Result<()> {
    let own = network.agent(agent)?;
    let fact = own.fact();
    let neighbours: Vec<AgentId> = own.neighbours().iter().copied().collect();

    for neighbour in neighbours {
        let mut history = InteractionHistory::default();
        for _ in 0..rounds {
            let answer = oracle.query(network, agent, neighbour, Question::SharedFact)?;
            history.record(answer == Answer::Fact(fact));
        }
        let opinion = history.to_opinion(tolerance)?;
        debug!(
            "{} bootstrapped {}: {} successes, {} failures",
            network.label(agent),
            network.label(neighbour),
            history.successes(),
            history.failures()
        );
        network.set_trust(agent, neighbour, TrustEntry::uniform(opinion))?;
    }
    Ok(())
}

/// Runs [`know_your_neighbours`] for every agent in index order.
pub fn bootstrap_all<O: Oracle + ?Sized>(
    network: &mut Network,
    oracle: &mut O,
    rounds: usize,
    tolerance: Tolerance,
) -> Result<()> {
    let ids: Vec<AgentId> = network.agents().map(|a| a.id()).collect();
    for id in ids {
        know_your_neighbours(network, oracle, id, rounds, tolerance)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Topology;
    use crate::oracle::PeerOracle;
    use trustnet_opinion::{Opinion, SequenceRandom};

    #[test]
    fn test_honest_neighbour_counts_successes() {
        let mut net = Network::new("boot", Topology::Directed);
        let a = net.add_agent("A", 1.0).unwrap();
        let b = net.add_agent("B", 1.0).unwrap();
        net.connect(a, b).unwrap();

        let tol = Tolerance::default();
        let mut oracle = PeerOracle::new(SequenceRandom::constant(0.5), tol);
        know_your_neighbours(&mut net, &mut oracle, a, 8, tol).unwrap();

        // 8 successes, 0 failures: <0.8, 0, 0.2>.
        let entry = net.trust(a, b).unwrap().unwrap();
        assert_eq!(entry.first, Opinion::new(0.8, 0.0, 0.2, 0.5, tol).unwrap());
        assert_eq!(entry.first, entry.second);
        assert_eq!(net.interactions().len(), 8);
    }

    #[test]
    fn test_liar_neighbour_counts_failures() {
        let mut net = Network::new("boot", Topology::Directed);
        let a = net.add_agent("A", 1.0).unwrap();
        let b = net.add_agent("B", 0.0).unwrap();
        net.connect(a, b).unwrap();

        let tol = Tolerance::default();
        let mut oracle = PeerOracle::new(SequenceRandom::constant(0.5), tol);
        know_your_neighbours(&mut net, &mut oracle, a, 2, tol).unwrap();

        let entry = net.trust(a, b).unwrap().unwrap();
        assert_eq!(entry.first, Opinion::new(0.0, 0.5, 0.5, 0.5, tol).unwrap());
    }

    #[test]
    fn test_zero_rounds_is_vacuous() {
        let mut net = Network::new("boot", Topology::Symmetric);
        let a = net.add_agent("A", 1.0).unwrap();
        let b = net.add_agent("B", 1.0).unwrap();
        net.connect(a, b).unwrap();

        let tol = Tolerance::default();
        let mut oracle = PeerOracle::new(SequenceRandom::constant(0.5), tol);
        bootstrap_all(&mut net, &mut oracle, 0, tol).unwrap();

        assert_eq!(net.trust(a, b).unwrap().unwrap().first, Opinion::vacuous(tol));
        assert_eq!(net.trust(b, a).unwrap().unwrap().first, Opinion::vacuous(tol));
        assert!(net.interactions().is_empty());
    }
}
