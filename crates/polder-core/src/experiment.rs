//! Experiment planning for sweeps and paired comparisons.
//!
//! Provides utilities for:
//! - Expanding a base configuration into a batch of planned runs that
//!   sweep a society input across an evenly spaced value grid
//! - Repeating each grid point over several deterministically seeded
//!   iterations
//! - Creating control/treatment run pairs that share a seed but differ
//!   in scenario (A/B comparison)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use polder_types::Scenario;

use crate::config::RunConfig;

/// One fully configured run inside an experiment batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedRun {
    /// Unique id for post-hoc comparison across batches.
    pub experiment_id: String,
    /// Human-readable label naming the scenario, swept value, and
    /// iteration.
    pub label: String,
    /// The grid value this run pins, if the scenario sweeps one.
    pub swept_value: Option<f64>,
    /// Zero-based repeat counter within the same grid value.
    pub iteration: u32,
    /// The complete configuration to build and run.
    pub config: RunConfig,
}

/// A batch of planned runs covering one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepPlan {
    /// The scenario every run in the batch uses.
    pub scenario: Scenario,
    /// The planned runs, grid-major then iteration-minor.
    pub runs: Vec<PlannedRun>,
}

/// A control/treatment run pair for A/B comparison.
///
/// Both runs share the same seed and population settings; only the
/// scenario differs.
#[derive(Debug, Clone)]
pub struct ComparisonPair {
    /// The baseline run (group A).
    pub control: PlannedRun,
    /// The alternative-scenario run (group B).
    pub treatment: PlannedRun,
}

/// Expand a base configuration into a batch of planned runs.
///
/// Sweep scenarios get an evenly spaced grid of `grid_points` values
/// over `[0, 1]`, pinned into the swept society input; every other
/// scenario gets a single unswept entry. Each grid entry is repeated
/// `iterations` times. Seeds count up from the base seed in plan
/// order, so the batch is reproducible while no two runs share a
/// random stream.
pub fn plan_sweep(base: &RunConfig, grid_points: u32, iterations: u32) -> SweepPlan {
    let scenario = base.simulation.scenario;
    let values = sweep_values(scenario, grid_points);

    let mut runs = Vec::new();
    let mut offset: u64 = 0;
    for value in values {
        for iteration in 0..iterations {
            let mut config = base.clone();
            config.simulation.seed = base.simulation.seed.wrapping_add(offset);
            apply_swept_value(&mut config, value);
            runs.push(PlannedRun {
                experiment_id: Uuid::now_v7().to_string(),
                label: run_label(scenario, value, iteration),
                swept_value: value,
                iteration,
                config,
            });
            offset = offset.wrapping_add(1);
        }
    }

    SweepPlan { scenario, runs }
}

/// Create a control/treatment pair with identical starting conditions
/// but different scenarios.
///
/// Both runs get the base seed, population, network, and surface
/// settings. The control run uses the baseline scenario; the treatment
/// run uses `treatment_scenario`. Each run gets a unique
/// `experiment_id` for post-hoc comparison.
pub fn create_comparison_pair(base: &RunConfig, treatment_scenario: Scenario) -> ComparisonPair {
    let mut control_config = base.clone();
    control_config.simulation.scenario = Scenario::Baseline;

    let mut treatment_config = base.clone();
    treatment_config.simulation.scenario = treatment_scenario;

    let control = PlannedRun {
        experiment_id: Uuid::now_v7().to_string(),
        label: format!("{} (control)", Scenario::Baseline),
        swept_value: None,
        iteration: 0,
        config: control_config,
    };
    let treatment = PlannedRun {
        experiment_id: Uuid::now_v7().to_string(),
        label: format!("{treatment_scenario} (treatment)"),
        swept_value: None,
        iteration: 0,
        config: treatment_config,
    };

    ComparisonPair { control, treatment }
}

/// Grid values for the scenario, `None` entries for non-sweep runs.
fn sweep_values(scenario: Scenario, grid_points: u32) -> Vec<Option<f64>> {
    match scenario {
        Scenario::PoliticalSituationSweep | Scenario::WelfareSweep => {
            grid(grid_points).into_iter().map(Some).collect()
        }
        Scenario::Baseline | Scenario::MemorylessPolicyA | Scenario::MemorylessPolicyB => {
            vec![None]
        }
    }
}

/// Evenly spaced values over `[0, 1]`, endpoints included.
///
/// Fewer than two points collapse to the midpoint.
fn grid(points: u32) -> Vec<f64> {
    match points.checked_sub(1) {
        None | Some(0) => vec![0.5],
        Some(gaps) => (0..points)
            .map(|point| f64::from(point) / f64::from(gaps))
            .collect(),
    }
}

/// Pin the swept value into the society input the scenario varies.
const fn apply_swept_value(config: &mut RunConfig, value: Option<f64>) {
    match (config.simulation.scenario, value) {
        (Scenario::PoliticalSituationSweep, Some(value)) => {
            config.society.political_situation = Some(value);
        }
        (Scenario::WelfareSweep, Some(value)) => config.society.welfare = Some(value),
        _ => {}
    }
}

fn run_label(scenario: Scenario, swept_value: Option<f64>, iteration: u32) -> String {
    swept_value.map_or_else(
        || format!("{scenario} iteration={iteration}"),
        |value| format!("{scenario} value={value:.2} iteration={iteration}"),
    )
}
