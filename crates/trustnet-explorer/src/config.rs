//! Operator configuration for an exploration run.
//!
//! A configuration holds one or two `(discount, consensus)` pairs. Each pair
//! fills one slot of every derived [`trustnet_network::TrustEntry`], so two
//! operator families can be compared on the same run.
//!
//! Names accepted on the wire:
//!
//! | Discount | Operator |
//! |----------|----------|
//! | `josang` | [`OperatorLibrary::discount`] |
//! | `aberdeen` | [`OperatorLibrary::graphical_combination`] |
//! | `aberdeen2` | [`OperatorLibrary::graphical_combination2`] |
//! | `aberdeen3` | [`OperatorLibrary::graphical_combination3`] |
//! | `uai_referee` (or `uai2013`) | [`OperatorLibrary::discount_uai_referee`] |
//!
//! | Consensus | Operator |
//! |-----------|----------|
//! | `josang_consensus` | [`OperatorLibrary::consensus_on_a_list`] |
//! | `aberdeen_consensus` | [`OperatorLibrary::graphical_discount_merge`] |
//! | `none` (or `none_consensus`) | no merge; several reports are an error |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use trustnet_opinion::{OperatorLibrary, Opinion, TrustPair};

use crate::error::{ExplorerError, Result};

/// Operator turning trust in an intermediary plus its report into a derived opinion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountKind {
    /// Josang discount.
    Josang,
    /// Graphical combination with the scaled rotation angle.
    Aberdeen,
    /// Graphical combination, parallel formulation.
    Aberdeen2,
    /// Graphical combination, half-angle formulation.
    Aberdeen3,
    /// Referee discount.
    UaiReferee,
}

impl DiscountKind {
    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            DiscountKind::Josang => "josang",
            DiscountKind::Aberdeen => "aberdeen",
            DiscountKind::Aberdeen2 => "aberdeen2",
            DiscountKind::Aberdeen3 => "aberdeen3",
            DiscountKind::UaiReferee => "uai_referee",
        }
    }

    /// Applies the operator to `(trust in intermediary, intermediary's report)`.
    pub fn apply(self, ops: &OperatorLibrary, trust: &Opinion, report: &Opinion) -> Result<Opinion> {
        let derived = match self {
            DiscountKind::Josang => ops.discount(trust, report),
            DiscountKind::Aberdeen => ops.graphical_combination(trust, report),
            DiscountKind::Aberdeen2 => ops.graphical_combination2(trust, report),
            DiscountKind::Aberdeen3 => ops.graphical_combination3(trust, report),
            DiscountKind::UaiReferee => ops.discount_uai_referee(trust, report),
        }?;
        Ok(derived)
    }
}

impl FromStr for DiscountKind {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "josang" => Ok(DiscountKind::Josang),
            "aberdeen" => Ok(DiscountKind::Aberdeen),
            "aberdeen2" => Ok(DiscountKind::Aberdeen2),
            "aberdeen3" => Ok(DiscountKind::Aberdeen3),
            "uai_referee" | "uai2013" => Ok(DiscountKind::UaiReferee),
            other => Err(ExplorerError::Configuration(format!(
                "unknown discount operator '{other}'"
            ))),
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator fusing several discounted opinions about the same agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsensusKind {
    /// Josang consensus folded over the list.
    JosangConsensus,
    /// Weighted graphical merge.
    AberdeenConsensus,
    /// No fusion available.
    None,
}

impl ConsensusKind {
    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            ConsensusKind::JosangConsensus => "josang_consensus",
            ConsensusKind::AberdeenConsensus => "aberdeen_consensus",
            ConsensusKind::None => "none",
        }
    }

    /// Fuses `(trust, discounted opinion)` pairs.
    ///
    /// # Errors
    /// [`ExplorerError::Configuration`] for [`ConsensusKind::None`], plus
    /// whatever the underlying operator rejects.
    pub fn merge(self, ops: &OperatorLibrary, pairs: &[TrustPair]) -> Result<Opinion> {
        let merged = match self {
            ConsensusKind::JosangConsensus => ops.consensus_on_a_list(pairs),
            ConsensusKind::AberdeenConsensus => ops.graphical_discount_merge(pairs),
            ConsensusKind::None => {
                return Err(ExplorerError::Configuration(format!(
                    "consensus 'none' cannot merge {} reports",
                    pairs.len()
                )))
            }
        }?;
        Ok(merged)
    }
}

impl FromStr for ConsensusKind {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "josang_consensus" => Ok(ConsensusKind::JosangConsensus),
            "aberdeen_consensus" => Ok(ConsensusKind::AberdeenConsensus),
            "none" | "none_consensus" => Ok(ConsensusKind::None),
            other => Err(ExplorerError::Configuration(format!(
                "unknown consensus operator '{other}'"
            ))),
        }
    }
}

impl fmt::Display for ConsensusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(discount, consensus)` pair. Serialized as a two-element array of names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct OperatorPair {
    /// Discount applied to every report.
    pub discount: DiscountKind,
    /// Consensus applied when several reports name the same agent.
    pub consensus: ConsensusKind,
}

impl OperatorPair {
    /// Creates a pair.
    pub const fn new(discount: DiscountKind, consensus: ConsensusKind) -> Self {
        Self {
            discount,
            consensus,
        }
    }
}

impl TryFrom<Vec<String>> for OperatorPair {
    type Error = ExplorerError;

    fn try_from(names: Vec<String>) -> Result<Self> {
        match names.as_slice() {
            [discount, consensus] => Ok(Self::new(discount.parse()?, consensus.parse()?)),
            _ => Err(ExplorerError::Configuration(format!(
                "each operator pair needs a discount and a consensus operator, got {} names",
                names.len()
            ))),
        }
    }
}

impl From<OperatorPair> for Vec<String> {
    fn from(pair: OperatorPair) -> Self {
        vec![pair.discount.to_string(), pair.consensus.to_string()]
    }
}

/// One or two operator pairs, validated on construction.
///
/// # Example
///
/// ```rust
/// use trustnet_explorer::{DiscountKind, OperatorConfiguration};
///
/// let config: OperatorConfiguration =
///     serde_json::from_str(r#"[["josang", "josang_consensus"], ["aberdeen", "aberdeen_consensus"]]"#)?;
/// assert_eq!(config.len(), 2);
/// assert_eq!(config.pairs()[1].discount, DiscountKind::Aberdeen);
///
/// assert!(serde_json::from_str::<OperatorConfiguration>("[]").is_err());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<OperatorPair>", into = "Vec<OperatorPair>")]
pub struct OperatorConfiguration {
    pairs: Vec<OperatorPair>,
}

impl OperatorConfiguration {
    /// Most pairs a configuration may hold.
    pub const MAX_PAIRS: usize = 2;

    /// Validates and wraps the pairs.
    ///
    /// # Errors
    /// [`ExplorerError::Configuration`] unless there are one or two pairs.
    pub fn new(pairs: Vec<OperatorPair>) -> Result<Self> {
        if pairs.is_empty() || pairs.len() > Self::MAX_PAIRS {
            return Err(ExplorerError::Configuration(format!(
                "one or two operator pairs are required, got {}",
                pairs.len()
            )));
        }
        Ok(Self { pairs })
    }

    /// A single pair.
    pub fn single(pair: OperatorPair) -> Self {
        Self { pairs: vec![pair] }
    }

    /// Two pairs evaluated side by side.
    pub fn comparing(first: OperatorPair, second: OperatorPair) -> Self {
        Self {
            pairs: vec![first, second],
        }
    }

    /// Parses `[[discount, consensus], ...]` names.
    pub fn from_names<S: AsRef<str>>(names: &[[S; 2]]) -> Result<Self> {
        let pairs = names
            .iter()
            .map(|[d, c]| -> Result<OperatorPair> {
                Ok(OperatorPair::new(d.as_ref().parse()?, c.as_ref().parse()?))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(pairs)
    }

    /// The pairs in slot order.
    pub fn pairs(&self) -> &[OperatorPair] {
        &self.pairs
    }

    /// Number of pairs (1 or 2).
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Always false for a validated configuration.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Default for OperatorConfiguration {
    fn default() -> Self {
        Self::single(OperatorPair::new(
            DiscountKind::Josang,
            ConsensusKind::JosangConsensus,
        ))
    }
}

impl TryFrom<Vec<OperatorPair>> for OperatorConfiguration {
    type Error = ExplorerError;

    fn try_from(pairs: Vec<OperatorPair>) -> Result<Self> {
        Self::new(pairs)
    }
}

impl From<OperatorConfiguration> for Vec<OperatorPair> {
    fn from(config: OperatorConfiguration) -> Self {
        config.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustnet_opinion::Tolerance;

    #[test]
    fn test_discount_names() {
        for kind in [
            DiscountKind::Josang,
            DiscountKind::Aberdeen,
            DiscountKind::Aberdeen2,
            DiscountKind::Aberdeen3,
            DiscountKind::UaiReferee,
        ] {
            assert_eq!(kind.as_str().parse::<DiscountKind>().unwrap(), kind);
        }
        assert_eq!("uai2013".parse::<DiscountKind>().unwrap(), DiscountKind::UaiReferee);
        assert!("jossang".parse::<DiscountKind>().is_err());
    }

    #[test]
    fn test_consensus_names() {
        assert_eq!(
            "none_consensus".parse::<ConsensusKind>().unwrap(),
            ConsensusKind::None
        );
        assert!(matches!(
            "majority".parse::<ConsensusKind>(),
            Err(ExplorerError::Configuration(_))
        ));
    }

    #[test]
    fn test_configuration_arity() {
        let pair = OperatorPair::new(DiscountKind::Josang, ConsensusKind::JosangConsensus);
        assert!(OperatorConfiguration::new(vec![]).is_err());
        assert!(OperatorConfiguration::new(vec![pair]).is_ok());
        assert!(OperatorConfiguration::new(vec![pair, pair]).is_ok());
        assert!(OperatorConfiguration::new(vec![pair, pair, pair]).is_err());
    }

    #[test]
    fn test_from_names() {
        let config = OperatorConfiguration::from_names(&[
            ["josang", "josang_consensus"],
            ["aberdeen3", "aberdeen_consensus"],
        ])
        .unwrap();
        assert_eq!(
            config.pairs()[1],
            OperatorPair::new(DiscountKind::Aberdeen3, ConsensusKind::AberdeenConsensus)
        );
        assert!(OperatorConfiguration::from_names(&[["josang", "bogus"]]).is_err());
    }

    #[test]
    fn test_serde_rejects_malformed_pairs() {
        assert!(serde_json::from_str::<OperatorConfiguration>(r#"[["josang"]]"#).is_err());
        assert!(serde_json::from_str::<OperatorConfiguration>(
            r#"[["josang", "josang_consensus", "extra"]]"#
        )
        .is_err());
        let json = serde_json::to_string(&OperatorConfiguration::default()).unwrap();
        assert_eq!(json, r#"[["josang","josang_consensus"]]"#);
    }

    #[test]
    fn test_none_consensus_refuses_to_merge() {
        let ops = OperatorLibrary::new(Tolerance::default());
        let b = Opinion::full_belief(ops.tolerance());
        let err = ConsensusKind::None.merge(&ops, &[(b, b), (b, b)]).unwrap_err();
        assert!(matches!(err, ExplorerError::Configuration(_)));
    }

    #[test]
    fn test_apply_dispatches() {
        let ops = OperatorLibrary::new(Tolerance::default());
        let t = Opinion::new(0.5, 0.2, 0.3, 0.5, ops.tolerance()).unwrap();
        let c = Opinion::new(0.4, 0.4, 0.2, 0.5, ops.tolerance()).unwrap();
        assert_eq!(
            DiscountKind::Josang.apply(&ops, &t, &c).unwrap(),
            ops.discount(&t, &c).unwrap()
        );
        assert_eq!(
            DiscountKind::UaiReferee.apply(&ops, &t, &c).unwrap(),
            ops.discount_uai_referee(&t, &c).unwrap()
        );
    }
}
