//! # Explorer
//!
//! Breadth-first, multi-source trust propagation for one agent.
//!
//! The explorer keeps two sets: `known` (itself plus every agent it holds an
//! opinion about) and `asked` (agents already asked to reveal everything).
//! Each round queries every agent in `known \ asked`, collects the agents
//! they mention that are not yet known, and derives an opinion about each
//! newcomer from the reports. The run ends when `known == asked`.
//!
//! ```text
//!   round 1          round 2          round 3
//!  ┌───────┐  ask   ┌───────┐  ask   ┌───────┐
//!  │ A     │ ─────▶ │ B, C  │ ─────▶ │ D     │ ─▶ fixed point
//!  └───────┘        └───────┘        └───────┘
//! ```
//!
//! Rounds are barriers: an agent discovered in round N is first queried in
//! round N+1. Within a round, responders and newcomers are handled in
//! ascending [`AgentId`] order.
//!
//! ## Deriving an opinion about a newcomer
//!
//! For every configured pair, in slot order:
//! - one report: discount the report by the explorer's trust in the reporter
//! - several reports: discount each, then merge the
//!   `(trust in reporter, discounted opinion)` list with the pair's consensus
//!
//! Slot `i` of the explorer's entry for a reporter is the trust used by pair `i`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use trustnet_network::{AgentId, Answer, Network, Oracle, Question, TrustEntry};
use trustnet_opinion::{OperatorLibrary, Opinion, TrustPair};

use crate::config::OperatorConfiguration;
use crate::error::{ExplorerError, Result};

/// Outcome of one [`Explorer::explore`] run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationReport {
    /// The exploring agent.
    pub agent: AgentId,
    /// Rounds in which at least one agent was queried.
    pub rounds: usize,
    /// "Reveal everything" queries issued.
    pub queries: usize,
    /// Agents added to the trust table, in discovery order.
    pub discovered: Vec<AgentId>,
}

impl ExplorationReport {
    /// Returns true if the run issued no queries.
    pub fn was_fixed_point(&self) -> bool {
        self.queries == 0
    }
}

/// Grows one agent's trust table until no known agent remains unasked.
///
/// # Example
///
/// ```rust
/// use trustnet_explorer::{Explorer, OperatorConfiguration};
/// use trustnet_network::{Network, PeerOracle, Topology, TrustEntry};
/// use trustnet_opinion::{OperatorLibrary, Opinion, SeededRandom, Tolerance};
///
/// let tol = Tolerance::default();
/// let mut net = Network::new("demo", Topology::Directed);
/// let a = net.add_agent("A", 1.0)?;
/// let b = net.add_agent("B", 1.0)?;
/// let c = net.add_agent("C", 1.0)?;
/// net.set_trust(a, b, TrustEntry::uniform(Opinion::new(0.8, 0.1, 0.1, 0.5, tol)?))?;
/// net.set_trust(b, c, TrustEntry::uniform(Opinion::new(0.6, 0.2, 0.2, 0.5, tol)?))?;
///
/// let explorer = Explorer::new(a, OperatorConfiguration::default(), OperatorLibrary::new(tol));
/// let mut oracle = PeerOracle::new(SeededRandom::new(1), tol);
/// let report = explorer.explore(&mut net, &mut oracle)?;
///
/// assert_eq!(report.discovered, vec![c]);
/// assert!(net.trust(a, c)?.is_some());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Explorer {
    agent: AgentId,
    configuration: OperatorConfiguration,
    operators: OperatorLibrary,
}

impl Explorer {
    /// Creates an explorer for `agent`.
    pub fn new(agent: AgentId, configuration: OperatorConfiguration, operators: OperatorLibrary) -> Self {
        Self {
            agent,
            configuration,
            operators,
        }
    }

    /// The exploring agent.
    pub fn agent(&self) -> AgentId {
        self.agent
    }

    /// Operator pairs in slot order.
    pub fn configuration(&self) -> &OperatorConfiguration {
        &self.configuration
    }

    /// Runs rounds until the fixed point.
    ///
    /// Agents the explorer asked in an earlier run on the same network count
    /// as asked, so a second run on a fully explored agent issues no queries.
    ///
    /// # Errors
    /// - [`ExplorerError::OracleContractViolation`] if a responder names an
    ///   agent it holds no opinion about
    /// - [`ExplorerError::Configuration`] if several reports need merging
    ///   under `none` consensus
    /// - any operator or network failure
    pub fn explore<O: Oracle + ?Sized>(
        &self,
        network: &mut Network,
        oracle: &mut O,
    ) -> Result<ExplorationReport> {
        let me = self.agent;
        let own = network.agent(me)?;

        let mut known: BTreeSet<AgentId> = own.trustees().collect();
        known.insert(me);
        let mut asked: BTreeSet<AgentId> = own.queried().clone();
        asked.insert(me);

        info!(
            "{} starts exploring: {} known, {} already asked",
            own.name(),
            known.len(),
            asked.len()
        );

        let mut report = ExplorationReport {
            agent: me,
            rounds: 0,
            queries: 0,
            discovered: Vec::new(),
        };

        loop {
            let pending: Vec<AgentId> = known.difference(&asked).copied().collect();
            if pending.is_empty() {
                break;
            }
            report.rounds += 1;
            debug!("Round {}: asking {} agents", report.rounds, pending.len());

            let mut mentions: BTreeMap<AgentId, Vec<(AgentId, Opinion)>> = BTreeMap::new();
            for &responder in &pending {
                let answer = oracle.query(network, me, responder, Question::Everything)?;
                report.queries += 1;

                self.check_contract(network, responder, &answer)?;
                for r in answer.reports() {
                    if !known.contains(&r.trustee) {
                        mentions
                            .entry(r.trustee)
                            .or_default()
                            .push((responder, r.opinion));
                    }
                }
            }

            for (newcomer, reports) in mentions {
                let entry = self.derive(network, &reports)?;
                debug!(
                    "{} learns about {} from {} reports: {}",
                    network.label(me),
                    network.label(newcomer),
                    reports.len(),
                    entry.first
                );
                network.set_trust(me, newcomer, entry)?;
                known.insert(newcomer);
                report.discovered.push(newcomer);
            }

            // Only a completed round counts as asked on the next run.
            for responder in pending {
                network.mark_queried(me, responder)?;
                asked.insert(responder);
            }
        }

        info!(
            "{} reached its fixed point after {} rounds ({} queries, {} discovered)",
            network.label(me),
            report.rounds,
            report.queries,
            report.discovered.len()
        );
        Ok(report)
    }

    fn check_contract(&self, network: &Network, responder: AgentId, answer: &Answer) -> Result<()> {
        let table = network.agent(responder)?.trust_table();
        if let Some(r) = answer.reports().iter().find(|r| !table.contains_key(&r.trustee)) {
            warn!(
                "Oracle contract violated: {} reported unknown trustee {}",
                network.label(responder),
                network.label(r.trustee)
            );
            return Err(ExplorerError::OracleContractViolation {
                responder: network.label(responder),
                trustee: network.label(r.trustee),
            });
        }
        Ok(())
    }

    /// Derives the entry for a newcomer from `(reporter, reported opinion)` pairs.
    fn derive(&self, network: &Network, reports: &[(AgentId, Opinion)]) -> Result<TrustEntry> {
        let mut slots = Vec::with_capacity(self.configuration.len());
        for (slot, pair) in self.configuration.pairs().iter().enumerate() {
            let mut discounted: Vec<TrustPair> = Vec::with_capacity(reports.len());
            for (reporter, opinion) in reports {
                let trust = self.trust_in(network, *reporter)?.slot(slot);
                discounted.push((trust, pair.discount.apply(&self.operators, &trust, opinion)?));
            }
            let derived = match discounted.as_slice() {
                [(_, single)] => *single,
                _ => pair.consensus.merge(&self.operators, &discounted)?,
            };
            slots.push(derived);
        }
        entry_from_slots(&slots)
    }

    fn trust_in(&self, network: &Network, intermediary: AgentId) -> Result<TrustEntry> {
        network
            .trust(self.agent, intermediary)?
            .copied()
            .ok_or_else(|| ExplorerError::MissingTrust {
                truster: network.label(self.agent),
                trustee: network.label(intermediary),
            })
    }

    /// Single-hop discount: asks `intermediary` about `target` and records the
    /// discounted opinion in the explorer's table.
    ///
    /// Returns `None`, recording nothing, when the intermediary holds no
    /// opinion about the target.
    pub fn discount_via<O: Oracle + ?Sized>(
        &self,
        network: &mut Network,
        oracle: &mut O,
        intermediary: AgentId,
        target: AgentId,
    ) -> Result<Option<TrustEntry>> {
        let answer = oracle.query(network, self.agent, intermediary, Question::AboutAgent(target))?;
        let reported = match answer {
            Answer::About(Some(opinion)) => opinion,
            _ => return Ok(None),
        };

        let trust = self.trust_in(network, intermediary)?;
        let slots = self
            .configuration
            .pairs()
            .iter()
            .enumerate()
            .map(|(slot, pair)| pair.discount.apply(&self.operators, &trust.slot(slot), &reported))
            .collect::<Result<Vec<_>>>()?;

        let entry = entry_from_slots(&slots)?;
        network.set_trust(self.agent, target, entry)?;
        Ok(Some(entry))
    }
}

fn entry_from_slots(slots: &[Opinion]) -> Result<TrustEntry> {
    match slots {
        [only] => Ok(TrustEntry::uniform(*only)),
        [first, second] => Ok(TrustEntry::new(*first, *second)),
        _ => Err(ExplorerError::Configuration(format!(
            "expected one or two derived opinions, got {}",
            slots.len()
        ))),
    }
}
