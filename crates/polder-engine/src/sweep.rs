//! Sweep batches: run every planned run and write combined tables.
//!
//! A sweep reuses the single-run pipeline per planned run, then merges
//! the captured tables into batch-level CSVs whose rows carry the
//! identifying columns of the run they came from, ready for cross-run
//! analysis without joining files by hand.

use std::fs;
use std::path::Path;

use tracing::info;

use polder_core::config::RunConfig;
use polder_core::experiment::{self, PlannedRun};
use polder_observer::export;

use crate::error::EngineError;
use crate::execute_run;

/// Run the configured scenario's sweep batch into `output`.
///
/// Each planned run gets its own `run-NNN` directory with the usual
/// artifacts. The batch directory additionally gets `plan.json` (the
/// expanded plan) and the combined tables `combined_model.csv` /
/// `combined_agents.csv`, each row prefixed with the scenario, swept
/// value, seed, and iteration of the run it came from.
///
/// # Errors
///
/// Returns [`EngineError`] if any planned run or artifact write fails.
/// Runs already exported keep their directories.
pub fn run_sweep(
    config: &RunConfig,
    output: &Path,
    grid_points: u32,
    iterations: u32,
) -> Result<(), EngineError> {
    let plan = experiment::plan_sweep(config, grid_points, iterations);
    info!(
        scenario = %plan.scenario,
        runs = plan.runs.len(),
        grid_points,
        iterations,
        "Sweep planned"
    );

    fs::create_dir_all(output)?;
    fs::write(
        output.join("plan.json"),
        serde_json::to_string_pretty(&plan)?,
    )?;

    let mut combined_model = format!(
        "scenario,swept_value,seed,iteration,{}\n",
        export::MODEL_HEADER
    );
    let mut combined_agents = format!(
        "scenario,swept_value,seed,iteration,{}\n",
        export::AGENT_HEADER
    );

    for (index, run) in plan.runs.iter().enumerate() {
        let dir = output.join(format!("run-{index:03}"));
        let (recorder, outcome) = execute_run(run, &dir)?;
        info!(
            label = %run.label,
            seed = run.config.simulation.seed,
            periods_run = outcome.periods_run,
            "Sweep run finished"
        );

        let prefix = run_prefix(run);
        for record in &recorder.model {
            combined_model.push_str(&format!("{prefix},{}\n", export::model_row(record)));
        }
        for record in &recorder.households {
            combined_agents.push_str(&format!("{prefix},{}\n", export::agent_row(record)));
        }
    }

    fs::write(output.join("combined_model.csv"), combined_model)?;
    fs::write(output.join("combined_agents.csv"), combined_agents)?;
    info!(dir = %output.display(), "Sweep artifacts written");

    Ok(())
}

/// The identifying columns prefixed to each combined-table row.
///
/// Non-sweep runs leave the swept-value cell empty.
fn run_prefix(run: &PlannedRun) -> String {
    let swept = run
        .swept_value
        .map_or_else(String::new, |value| value.to_string());
    format!(
        "{},{},{},{}",
        run.config.simulation.scenario, swept, run.config.simulation.seed, run.iteration
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use polder_core::config::{PopulationConfig, SimulationConfig, SocietyConfig};
    use polder_core::experiment::SweepPlan;
    use polder_types::Scenario;

    use super::*;

    fn small_config(scenario: Scenario) -> RunConfig {
        RunConfig {
            simulation: SimulationConfig {
                seed: 100,
                periods: 3,
                scenario,
            },
            population: PopulationConfig {
                households: 8,
                savings_min: 500.0,
                savings_max: 5000.0,
            },
            society: SocietyConfig {
                political_situation: Some(0.6),
                welfare: Some(0.7),
            },
            ..RunConfig::default()
        }
    }

    fn temp_output(tag: &str) -> std::path::PathBuf {
        let unique = format!(
            "polder_sweep_test_{tag}_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        );
        std::env::temp_dir().join(unique)
    }

    #[test]
    fn sweep_writes_per_run_and_combined_artifacts() {
        let dir = temp_output("grid");
        let config = small_config(Scenario::PoliticalSituationSweep);

        run_sweep(&config, &dir, 2, 1).unwrap();

        assert!(dir.join("run-000").join("model.csv").exists());
        assert!(dir.join("run-001").join("run.json").exists());

        let combined = std::fs::read_to_string(dir.join("combined_model.csv")).unwrap();
        let mut lines = combined.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("scenario,swept_value,seed,iteration,period,"));
        // 2 runs of 3 periods each.
        assert_eq!(combined.lines().count(), 7);
        let first_row = lines.next().unwrap();
        assert!(first_row.starts_with("political-situation-sweep,0,100,0,"));

        let json = std::fs::read_to_string(dir.join("plan.json")).unwrap();
        let plan: SweepPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(plan.scenario, Scenario::PoliticalSituationSweep);
        assert_eq!(plan.runs.len(), 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn non_sweep_batch_leaves_swept_cell_empty() {
        let dir = temp_output("plain");
        let config = small_config(Scenario::MemorylessPolicyA);

        run_sweep(&config, &dir, 5, 1).unwrap();

        let combined = std::fs::read_to_string(dir.join("combined_model.csv")).unwrap();
        let first_row = combined.lines().nth(1).unwrap();
        assert!(first_row.starts_with("memoryless-policy-a,,100,0,"));

        let agents = std::fs::read_to_string(dir.join("combined_agents.csv")).unwrap();
        // 1 run, 3 periods, 8 households.
        assert_eq!(agents.lines().count(), 25);

        std::fs::remove_dir_all(&dir).ok();
    }
}
