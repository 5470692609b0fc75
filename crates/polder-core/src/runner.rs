//! Bounded simulation loop over the period cycle.
//!
//! [`run_simulation`] drives [`run_period`] for a configured number of
//! periods, notifying the observer once per committed period, and
//! reports how the run went.
//!
//! [`run_period`]: crate::tick::run_period

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::observe::PeriodObserver;
use crate::tick::{self, PeriodSummary, SimulationState, TickError};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A period execution failed.
    #[error("period error: {source}")]
    Period {
        /// The underlying period error.
        #[from]
        source: TickError,
    },
}

/// Result of a bounded simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Number of periods executed.
    pub periods_run: u64,
    /// The last period summary, if any period completed.
    pub final_summary: Option<PeriodSummary>,
}

/// Run the simulation for `max_periods` periods.
///
/// # Errors
///
/// Returns [`RunnerError`] if a period fails. State touched by the
/// failed period is left as is; the caller abandons the run.
pub fn run_simulation(
    state: &mut SimulationState,
    observer: &mut dyn PeriodObserver,
    max_periods: u64,
) -> Result<RunOutcome, RunnerError> {
    info!(
        max_periods,
        scenario = %state.scenario,
        households = state.households.len(),
        "Simulation starting"
    );

    let mut final_summary: Option<PeriodSummary> = None;
    let mut periods_run: u64 = 0;

    while periods_run < max_periods {
        let summary = tick::run_period(state, observer)?;
        periods_run = periods_run.saturating_add(1);
        final_summary = Some(summary);
    }

    info!(
        periods_run,
        adapted = final_summary
            .as_ref()
            .map(|summary| summary.adapted_households),
        "Simulation ended"
    );

    Ok(RunOutcome {
        periods_run,
        final_summary,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use polder_types::Scenario;

    use super::*;
    use crate::config::{PopulationConfig, RunConfig, SimulationConfig, SocietyConfig};
    use crate::observe::{NoOpObserver, PeriodObserver};

    fn small_config(seed: u64) -> RunConfig {
        RunConfig {
            simulation: SimulationConfig {
                seed,
                periods: 12,
                scenario: Scenario::Baseline,
            },
            population: PopulationConfig {
                households: 12,
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

    /// Records every summary it sees, checking the clock agrees.
    struct RecordingObserver {
        summaries: Vec<PeriodSummary>,
    }

    impl PeriodObserver for RecordingObserver {
        fn on_period(&mut self, summary: &PeriodSummary, state: &SimulationState) {
            assert_eq!(summary.period, state.clock.period());
            self.summaries.push(summary.clone());
        }
    }

    #[test]
    fn bounded_by_max_periods() {
        let mut state = SimulationState::build(&small_config(2)).unwrap();
        let mut observer = NoOpObserver;
        let outcome = run_simulation(&mut state, &mut observer, 5).unwrap();
        assert_eq!(outcome.periods_run, 5);
        assert_eq!(state.clock.period(), 5);
        assert_eq!(outcome.final_summary.unwrap().period, 4);
    }

    #[test]
    fn zero_periods_runs_nothing() {
        let mut state = SimulationState::build(&small_config(2)).unwrap();
        let mut observer = NoOpObserver;
        let outcome = run_simulation(&mut state, &mut observer, 0).unwrap();
        assert_eq!(outcome.periods_run, 0);
        assert!(outcome.final_summary.is_none());
        assert_eq!(state.clock.period(), 0);
    }

    #[test]
    fn observer_sees_every_period_in_order() {
        let mut state = SimulationState::build(&small_config(6)).unwrap();
        let mut observer = RecordingObserver {
            summaries: Vec::new(),
        };
        let _ = run_simulation(&mut state, &mut observer, 8).unwrap();
        let periods: Vec<u64> = observer
            .summaries
            .iter()
            .map(|summary| summary.period)
            .collect();
        assert_eq!(periods, (0..8).collect::<Vec<u64>>());
    }

    #[test]
    fn identical_seeds_reproduce_identical_runs() {
        let config = small_config(7);
        let mut first = SimulationState::build(&config).unwrap();
        let mut second = SimulationState::build(&config).unwrap();

        let mut first_observer = RecordingObserver {
            summaries: Vec::new(),
        };
        let mut second_observer = RecordingObserver {
            summaries: Vec::new(),
        };
        let _ = run_simulation(&mut first, &mut first_observer, 12).unwrap();
        let _ = run_simulation(&mut second, &mut second_observer, 12).unwrap();

        assert_eq!(first_observer.summaries, second_observer.summaries);
        assert_eq!(first.households, second.households);
    }

    #[test]
    fn canonical_small_world_run_is_reproducible() {
        let config = RunConfig {
            simulation: SimulationConfig {
                seed: 1,
                periods: 20,
                scenario: Scenario::Baseline,
            },
            population: PopulationConfig {
                households: 50,
                savings_min: 500.0,
                savings_max: 5000.0,
            },
            society: SocietyConfig {
                political_situation: Some(0.6),
                welfare: Some(0.7),
            },
            ..RunConfig::default()
        };
        assert!((config.network.connection_probability - 0.4).abs() < f64::EPSILON);
        assert_eq!(config.network.nearest_neighbours, 5);

        let mut first = SimulationState::build(&config).unwrap();
        let mut second = SimulationState::build(&config).unwrap();
        let mut observer = NoOpObserver;

        let first_outcome = run_simulation(&mut first, &mut observer, 20).unwrap();
        let second_outcome = run_simulation(&mut second, &mut observer, 20).unwrap();

        let first_final = first_outcome.final_summary.unwrap();
        let second_final = second_outcome.final_summary.unwrap();
        assert!(first_final.adapted_households <= 50);
        assert_eq!(first_final, second_final);
    }
}
