//! Simulation engine binary for the polder model.
//!
//! This is the entry point that wires configuration, state building,
//! the period loop, record capture, and artifact export together. Two
//! commands are available: `run` executes a single configured
//! simulation, `sweep` expands the configured scenario into a batch of
//! planned runs and additionally writes combined, run-labelled tables.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Parse the command line
//! 3. Load configuration from the YAML config file
//! 4. Dispatch to the requested command
//! 5. Log the result

mod error;
mod sweep;

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use polder_core::config::RunConfig;
use polder_core::experiment::PlannedRun;
use polder_core::runner::{self, RunOutcome};
use polder_core::tick::SimulationState;
use polder_observer::{Recorder, RunManifest, export_run};

use crate::error::EngineError;

/// Polder flood-adaptation simulation engine.
#[derive(Debug, Parser)]
#[command(name = "polder-engine")]
#[command(about = "Run the polder flood-adaptation simulation and export run artifacts")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, default_value = "polder-config.yaml")]
    config: PathBuf,

    /// Directory run artifacts are written into.
    #[arg(long, default_value = "runs")]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Engine commands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Run a single simulation and export its artifacts.
    Run,

    /// Expand the configured scenario into a sweep batch, run every
    /// planned run, and export per-run plus combined artifacts.
    Sweep {
        /// Number of grid points for sweep scenarios.
        #[arg(long, default_value_t = 5)]
        grid_points: u32,

        /// Repeats per grid value.
        #[arg(long, default_value_t = 3)]
        iterations: u32,
    },
}

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration loading, the simulation itself, or
/// artifact export fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("polder-engine starting");

    // 2. Parse the command line.
    let cli = Cli::parse();

    // 3. Load configuration.
    let config = load_config(&cli.config)?;
    info!(
        seed = config.simulation.seed,
        periods = config.simulation.periods,
        scenario = %config.simulation.scenario,
        households = config.population.households,
        "Configuration loaded"
    );

    // 4. Dispatch to the requested command.
    match cli.command {
        Command::Run => {
            let outcome = run_once(&config, &cli.output)?;

            // 5. Log the result.
            info!(
                periods_run = outcome.periods_run,
                adapted = outcome
                    .final_summary
                    .as_ref()
                    .map(|summary| summary.adapted_households),
                "polder-engine shutdown complete"
            );
        }
        Command::Sweep {
            grid_points,
            iterations,
        } => {
            sweep::run_sweep(&config, &cli.output, grid_points, iterations)?;
            info!("polder-engine shutdown complete");
        }
    }

    Ok(())
}

/// Load the run configuration from the given YAML path.
///
/// A missing file is not an error; defaults are used so the engine can
/// run without any configuration on disk.
fn load_config(path: &Path) -> Result<RunConfig, EngineError> {
    if path.exists() {
        let config = RunConfig::from_file(path)?;
        Ok(config)
    } else {
        info!(path = %path.display(), "Config file not found, using defaults");
        Ok(RunConfig::default())
    }
}

/// Run a single simulation with the loaded configuration and export its
/// artifacts into `output`.
fn run_once(config: &RunConfig, output: &Path) -> Result<RunOutcome, EngineError> {
    let run = PlannedRun {
        experiment_id: Uuid::now_v7().to_string(),
        label: config.simulation.scenario.to_string(),
        swept_value: None,
        iteration: 0,
        config: config.clone(),
    };
    let (_, outcome) = execute_run(&run, output)?;
    Ok(outcome)
}

/// Build, run, and export one planned run, returning the captured
/// records and the outcome.
fn execute_run(run: &PlannedRun, dir: &Path) -> Result<(Recorder, RunOutcome), EngineError> {
    let started_at = Utc::now();

    let mut state = SimulationState::build(&run.config)?;
    let mut recorder = Recorder::new();
    let outcome =
        runner::run_simulation(&mut state, &mut recorder, run.config.simulation.periods)?;

    let manifest = RunManifest {
        experiment_id: run.experiment_id.clone(),
        label: run.label.clone(),
        config: run.config.clone(),
        periods_run: outcome.periods_run,
        final_summary: outcome.final_summary.clone(),
        started_at,
        finished_at: Utc::now(),
    };
    export_run(dir, &recorder, &manifest)?;

    Ok((recorder, outcome))
}
