//! Ground-truth evaluation of an exploration.
//!
//! The correct opinion about agent `x` is `⟨p_x, 1 − p_x, 0, ½⟩`, where
//! `p_x` is its truthfulness. Every derived opinion is scored by its
//! Euclidean distance to that opinion and by the gap between the two
//! expected values.

use serde::Serialize;
use trustnet_network::{AgentId, Network};
use trustnet_opinion::{Opinion, Tolerance};

use crate::Result;

/// One derived opinion and how far it is from the truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotScore {
    /// Opinion the explorer holds.
    pub opinion: Opinion,
    /// Euclidean distance to the ground truth.
    pub distance: f64,
    /// Gap between the expected values.
    pub distance_expected_value: f64,
}

impl SlotScore {
    fn against(opinion: Opinion, truth: &Opinion) -> Self {
        Self {
            opinion,
            distance: opinion.distance(truth),
            distance_expected_value: opinion.distance_expected_value(truth),
        }
    }
}

/// Scores for one agent other than the explorer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentEvaluation {
    /// Evaluated agent.
    pub agent: AgentId,
    /// Its name.
    pub name: String,
    /// Its truthfulness.
    pub truthfulness: f64,
    /// Score per configuration slot, `None` when the explorer holds no opinion.
    pub slots: Vec<Option<SlotScore>>,
}

/// Mean and standard deviation of one score over the discovered agents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSummary {
    /// Number of scored agents.
    pub count: usize,
    /// Mean score.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl ScoreSummary {
    fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            count: values.len(),
            mean,
            std_dev: variance.sqrt(),
        })
    }
}

/// Evaluation of every agent from the explorer's point of view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Exploring agent.
    pub explorer: AgentId,
    /// One row per other agent, in index order.
    pub agents: Vec<AgentEvaluation>,
}

impl Evaluation {
    /// Scores `explorer`'s table against the ground truth for `slots` slots.
    pub fn of(network: &Network, explorer: AgentId, slots: usize, tolerance: Tolerance) -> Result<Self> {
        let own = network.agent(explorer)?;
        let mut agents = Vec::new();

        for other in network.agents().filter(|a| a.id() != explorer) {
            let truth = other.ground_truth(tolerance)?;
            let entry = own.opinion_about(other.id());
            let scores = (0..slots)
                .map(|slot| entry.map(|e| SlotScore::against(e.slot(slot), &truth)))
                .collect();
            agents.push(AgentEvaluation {
                agent: other.id(),
                name: other.name().to_string(),
                truthfulness: other.truthfulness(),
                slots: scores,
            });
        }

        Ok(Self { explorer, agents })
    }

    /// Agents the explorer holds an opinion about.
    pub fn known(&self) -> usize {
        self.agents
            .iter()
            .filter(|a| a.slots.iter().any(Option::is_some))
            .count()
    }

    /// Summary of the distances in `slot`.
    pub fn distance_summary(&self, slot: usize) -> Option<ScoreSummary> {
        ScoreSummary::of(&self.collect(slot, |s| s.distance))
    }

    /// Summary of the expected-value distances in `slot`.
    pub fn expected_value_summary(&self, slot: usize) -> Option<ScoreSummary> {
        ScoreSummary::of(&self.collect(slot, |s| s.distance_expected_value))
    }

    fn collect(&self, slot: usize, score: impl Fn(&SlotScore) -> f64) -> Vec<f64> {
        self.agents
            .iter()
            .filter_map(|a| a.slots.get(slot).copied().flatten())
            .map(|s| score(&s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustnet_network::{Topology, TrustEntry};

    fn tol() -> Tolerance {
        Tolerance::default()
    }

    fn op(b: f64, d: f64, u: f64) -> Opinion {
        Opinion::new(b, d, u, 0.5, tol()).unwrap()
    }

    #[test]
    fn test_exact_opinion_scores_zero() {
        let mut net = Network::new("eval", Topology::Directed);
        let a = net.add_agent("A", 1.0).unwrap();
        let b = net.add_agent("B", 0.25).unwrap();
        let c = net.add_agent("C", 0.5).unwrap();
        net.set_trust(a, b, TrustEntry::new(op(0.25, 0.75, 0.0), op(0.0, 0.0, 1.0)))
            .unwrap();

        let eval = Evaluation::of(&net, a, 2, tol()).unwrap();
        assert_eq!(eval.agents.len(), 2);
        assert_eq!(eval.known(), 1);

        let row_b = &eval.agents[0];
        let first = row_b.slots[0].unwrap();
        assert!(first.distance.abs() < 1e-12);
        assert!(first.distance_expected_value.abs() < 1e-12);

        // Vacuous against ⟨.25, .75, 0⟩: expected values .5 and .25.
        let second = row_b.slots[1].unwrap();
        assert!((second.distance_expected_value - 0.25).abs() < 1e-12);
        assert!((second.distance - (0.25f64.powi(2) + 0.75f64.powi(2) + 1.0).sqrt()).abs() < 1e-12);

        assert_eq!(eval.agents[1].agent, c);
        assert!(eval.agents[1].slots.iter().all(Option::is_none));
    }

    #[test]
    fn test_summaries() {
        let mut net = Network::new("eval", Topology::Directed);
        let a = net.add_agent("A", 1.0).unwrap();
        let b = net.add_agent("B", 1.0).unwrap();
        let c = net.add_agent("C", 0.0).unwrap();
        net.set_trust(a, b, TrustEntry::uniform(op(1.0, 0.0, 0.0))).unwrap();
        net.set_trust(a, c, TrustEntry::uniform(op(1.0, 0.0, 0.0))).unwrap();

        let eval = Evaluation::of(&net, a, 1, tol()).unwrap();
        let summary = eval.expected_value_summary(0).unwrap();
        assert_eq!(summary.count, 2);
        assert!((summary.mean - 0.5).abs() < 1e-12);
        assert!((summary.std_dev - 0.5).abs() < 1e-12);
        assert!(eval.distance_summary(1).is_none());
    }
}
