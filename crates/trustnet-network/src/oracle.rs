//! The in-process query primitive between agents.
//!
//! Every piece of information an agent obtains about the rest of the network
//! goes through [`Oracle::query`]. The [`PeerOracle`] answers on behalf of the
//! asked agent and lies with probability `1 - p`, drawing from an injected
//! [`RandomSource`].

use serde::{Deserialize, Serialize};
use tracing::debug;
use trustnet_opinion::{random_opinion_different, Opinion, RandomSource, Tolerance};

use crate::agent::AgentId;
use crate::error::Result;
use crate::network::Network;

/// What one agent can ask another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Question {
    /// "What is your copy of the shared fact?"
    SharedFact,
    /// "Reveal every agent you hold an opinion about."
    Everything,
    /// "What is your opinion about this agent?"
    AboutAgent(AgentId),
}

/// One `(trustee, opinion)` pair revealed by an agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// The agent the opinion is about.
    pub trustee: AgentId,
    /// The reported opinion, which may be a lie.
    pub opinion: Opinion,
}

/// Answer to a [`Question`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Answer {
    /// Answer to [`Question::SharedFact`].
    Fact(bool),
    /// Answer to [`Question::Everything`]; a subset of the responder's trustees.
    Reports(Vec<Report>),
    /// Answer to [`Question::AboutAgent`]; `None` when the responder has no opinion.
    About(Option<Opinion>),
}

impl Answer {
    /// The reports, or an empty slice for any other answer.
    pub fn reports(&self) -> &[Report] {
        match self {
            Answer::Reports(reports) => reports,
            _ => &[],
        }
    }
}

/// Append-only audit entry written by every [`Oracle::query`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Agent that asked.
    pub asker: AgentId,
    /// Agent that answered.
    pub responder: AgentId,
    /// What was asked.
    pub question: Question,
    /// What came back.
    pub answer: Answer,
}

/// Answers questions on behalf of agents.
pub trait Oracle {
    /// Computes `responder`'s answer to `question`.
    ///
    /// An answer to [`Question::Everything`] may omit trustees but must
    /// never name an agent the responder holds no opinion about.
    fn answer(&mut self, network: &Network, responder: AgentId, question: &Question)
        -> Result<Answer>;

    /// Asks `responder` on behalf of `asker` and logs the exchange.
    fn query(
        &mut self,
        network: &mut Network,
        asker: AgentId,
        responder: AgentId,
        question: Question,
    ) -> Result<Answer> {
        let answer = self.answer(network, responder, &question)?;
        network.record_interaction(asker, responder, question, answer.clone())?;
        Ok(answer)
    }
}

impl<O: Oracle + ?Sized> Oracle for &mut O {
    fn answer(
        &mut self,
        network: &Network,
        responder: AgentId,
        question: &Question,
    ) -> Result<Answer> {
        (**self).answer(network, responder, question)
    }
}

/// Oracle simulating honest and deceptive peers.
///
/// Each answer flips a coin that comes up "truth" with the responder's
/// truthfulness `p`:
///
/// | Question | Truth | Lie |
/// |----------|-------|-----|
/// | shared fact | own fact | negated fact |
/// | about agent | own first opinion | different random opinion |
/// | everything | per trustee: a first coin decides whether to mention it, a second whether the opinion is honest |
#[derive(Debug, Clone)]
pub struct PeerOracle<R> {
    rng: R,
    tolerance: Tolerance,
}

impl<R: RandomSource> PeerOracle<R> {
    /// Creates an oracle drawing from `rng`.
    pub fn new(rng: R, tolerance: Tolerance) -> Self {
        Self { rng, tolerance }
    }

    /// Tolerance used for sampled opinions.
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    fn truth(&mut self, truthfulness: f64) -> bool {
        self.rng.uniform() < truthfulness
    }

    fn lie_about(&mut self, opinion: &Opinion) -> Opinion {
        random_opinion_different(&mut self.rng, opinion, self.tolerance)
    }
}

impl<R: RandomSource> Oracle for PeerOracle<R> {
    fn answer(
        &mut self,
        network: &Network,
        responder: AgentId,
        question: &Question,
    ) -> Result<Answer> {
        let agent = network.agent(responder)?;
        let p = agent.truthfulness();

        let answer = match question {
            Question::SharedFact => {
                if self.truth(p) {
                    Answer::Fact(agent.fact())
                } else {
                    debug!("{} lies about the shared fact", agent.name());
                    Answer::Fact(!agent.fact())
                }
            }
            Question::AboutAgent(other) => match agent.opinion_about(*other) {
                Some(entry) if self.truth(p) => Answer::About(Some(entry.first)),
                Some(entry) => {
                    debug!("{} lies about its opinion of {}", agent.name(), other);
                    Answer::About(Some(self.lie_about(&entry.first)))
                }
                None => Answer::About(None),
            },
            Question::Everything => {
                let mut reports = Vec::new();
                for (&trustee, entry) in agent.trust_table() {
                    if !self.truth(p) {
                        continue;
                    }
                    let opinion = if self.truth(p) {
                        entry.first
                    } else {
                        debug!("{} lies in its report about {}", agent.name(), trustee);
                        self.lie_about(&entry.first)
                    };
                    reports.push(Report { trustee, opinion });
                }
                Answer::Reports(reports)
            }
        };
        Ok(answer)
    }
}
