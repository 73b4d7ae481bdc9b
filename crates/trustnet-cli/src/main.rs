//! Trustnet CLI - Command-line driver for trust-propagation experiments

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trustnet_core::{RunOutcome, Trustnet, TrustnetConfig};

#[derive(Parser)]
#[command(name = "trustnet")]
#[command(about = "Trustnet - Subjective Logic trust propagation experiments")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Generate, bootstrap and explore a network
    Explore {
        /// Configuration file path (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<String>,

        /// Print the evaluation as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check configuration validity
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "config/trustnet.json")]
        config: String,
    },
    /// Show trustnet status
    Status,
}

fn load(path: Option<&str>) -> anyhow::Result<TrustnetConfig> {
    match path {
        Some(path) => {
            let config = TrustnetConfig::from_file(path)
                .with_context(|| format!("loading configuration from {}", path))?;
            info!("Loaded configuration from {}", path);
            Ok(config)
        }
        None => Ok(TrustnetConfig::default()),
    }
}

fn print_outcome(outcome: &RunOutcome) {
    let report = &outcome.report;
    println!(
        "Explorer {} reached its fixed point: {} rounds, {} queries, {} discovered",
        outcome.network.label(report.agent),
        report.rounds,
        report.queries,
        report.discovered.len()
    );
    println!();

    for row in &outcome.evaluation.agents {
        println!("{} (p = {:.3})", row.name, row.truthfulness);
        for (slot, score) in row.slots.iter().enumerate() {
            match score {
                Some(s) => println!(
                    "  [{}] {}  distance {:.4}  expected-value distance {:.4}",
                    slot + 1,
                    s.opinion,
                    s.distance,
                    s.distance_expected_value
                ),
                None => println!("  [{}] unknown", slot + 1),
            }
        }
    }

    let slots = outcome
        .evaluation
        .agents
        .first()
        .map_or(0, |row| row.slots.len());
    println!();
    for slot in 0..slots {
        let distance = outcome.evaluation.distance_summary(slot);
        let expected = outcome.evaluation.expected_value_summary(slot);
        if let (Some(d), Some(e)) = (distance, expected) {
            println!(
                "Configuration {}: {} agents, distance {:.4} ± {:.4}, expected-value distance {:.4} ± {:.4}",
                slot + 1,
                d.count,
                d.mean,
                d.std_dev,
                e.mean,
                e.std_dev
            );
        } else {
            println!("Configuration {}: nothing discovered", slot + 1);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match cli.command {
        Some(Commands::Explore { config, json }) => {
            let config = load(config.as_deref())?;
            let mut trustnet = Trustnet::new(config)?;
            let outcome = trustnet.run()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.evaluation)?);
            } else {
                print_outcome(&outcome);
            }
        }
        Some(Commands::Check { config }) => {
            let parsed = load(Some(&config))?;
            println!("Checking config: {}", config);
            println!(
                "  {} agents, {}% links, {:?} topology",
                parsed.network.agents, parsed.network.link_percentage, parsed.network.topology
            );
            println!(
                "  explorer {} with operators {:?}",
                parsed.exploration.agent,
                parsed.exploration.operators.pairs()
            );
            println!("Configuration OK");
        }
        Some(Commands::Status) => {
            println!("Trustnet status: READY");
        }
        None => {
            println!("Trustnet v{} - Use --help for commands", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
