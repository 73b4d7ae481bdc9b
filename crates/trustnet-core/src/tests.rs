//! Unit tests for trustnet-core.

use crate::{Trustnet, TrustnetConfig, TrustnetError};

fn small_config() -> TrustnetConfig {
    TrustnetConfig::default()
        .with_agents(6)
        .with_link_percentage(50)
        .with_bootstrap_rounds(4)
        .with_seed(11)
}

#[test]
fn test_invalid_config_is_rejected() {
    let result = Trustnet::new(TrustnetConfig::default().with_agents(0));
    assert!(matches!(result, Err(TrustnetError::Config(_))));
}

#[test]
fn test_stages_work_on_copies() {
    let mut trustnet = Trustnet::new(small_config()).unwrap();
    let generated = trustnet.generate().unwrap();
    let bootstrapped = trustnet.bootstrap(&generated).unwrap();

    assert!(generated.agents().all(|a| a.trust_table().is_empty()));
    for agent in bootstrapped.agents() {
        assert_eq!(agent.trust_table().len(), agent.neighbours().len());
    }

    let outcome = trustnet.explore(&bootstrapped).unwrap();
    assert!(bootstrapped.agents().all(|a| a.queried().is_empty()));
    assert_eq!(outcome.report.queries, outcome.network.interactions().len());
}

#[test]
fn test_unknown_explorer_fails() {
    let mut trustnet = Trustnet::new(small_config().with_explorer("Nobody")).unwrap();
    let err = trustnet.run().unwrap_err();
    assert!(matches!(err, TrustnetError::Network(_)));
}

#[test]
fn test_run_is_reproducible() {
    let first = Trustnet::new(small_config()).unwrap().run().unwrap();
    let second = Trustnet::new(small_config()).unwrap().run().unwrap();
    assert_eq!(first.report, second.report);
    assert_eq!(first.evaluation, second.evaluation);
}
