use std::path::PathBuf;

use clap::Parser;

use hearts_sim::config::{ResolvedOutputs, SimConfig};
use hearts_sim::logging::init_logging;
use hearts_sim::runner::SimRunner;

/// Seeded Hearts simulator driven by the built-in heuristic.
#[derive(Debug, Parser)]
#[command(
    name = "hearts-sim",
    author,
    version,
    about = "Deterministic Hearts round simulator"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "sim/sim.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of rounds to play.
    #[arg(long, value_name = "ROUNDS")]
    rounds: Option<usize>,

    /// Override the RNG seed for dealing.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no rounds are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SimConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(rounds) = cli.rounds {
        config.rounds = rounds;
    }

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let rounds = config.rounds;
    let seed = config.seed();

    println!("Loaded configuration '{run_id}' ({rounds} rounds, seed {seed})");

    if cli.validate_only {
        println!("Validation-only mode: no rounds played.");
        return Ok(());
    }

    let logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = SimRunner::new(config, outputs)?;
    let summary = runner.run()?;

    println!(
        "Run complete for '{run_id}': {} rounds, {} rows at {}",
        summary.rounds_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    for (index, name) in summary.names.iter().enumerate() {
        println!(
            "  {name:<12} points {:>5}  wins {:>4}",
            summary.total_points[index], summary.wins[index]
        );
    }
    if summary.moons > 0 {
        println!("  moon shots: {}", summary.moons);
    }
    if let Some(path) = logging_guard.log_path.as_ref() {
        println!("Event log: {}", path.display());
    }

    Ok(())
}
