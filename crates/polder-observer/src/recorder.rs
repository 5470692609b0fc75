//! In-process capture of the per-period record tables.
//!
//! [`Recorder`] implements [`PeriodObserver`] and snapshots one
//! [`ModelRecord`] per committed period plus one [`HouseholdRecord`] per
//! household per period, rows in (period, household id) order. These are
//! the two tables the export module writes to `model.csv` and
//! `agents.csv`.

use serde::{Deserialize, Serialize};

use polder_agents::HouseholdState;
use polder_core::observe::PeriodObserver;
use polder_core::tick::{PeriodSummary, SimulationState};

/// One row of the model-level table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// The committed period.
    pub period: u64,
    /// Households whose sandbag effort clears the adaptation threshold.
    pub adapted_households: u32,
    /// Committed information-provision instrument value.
    pub information_provision: f64,
    /// Committed subsidies instrument value.
    pub subsidies: f64,
    /// Committed regulation instrument value.
    pub regulation: f64,
    /// Committed infrastructure instrument value.
    pub infrastructure: f64,
    /// Committed government budget.
    pub government_budget: f64,
    /// Committed water-authority attitude.
    pub water_attitude: f64,
    /// The run's fixed political-situation input.
    pub political_situation: f64,
    /// Whether a protest took place this period.
    pub protest: bool,
    /// Whether the insurer ran a media campaign this period.
    pub media_activity: bool,
    /// Whether a flood event fired this period.
    pub flooded: bool,
}

/// One row of the household-level table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdRecord {
    /// The committed period.
    pub period: u64,
    /// Household id, equal to the social-graph node index.
    pub household: u32,
    /// Horizontal location on the flood surface.
    pub x: f64,
    /// Vertical location on the flood surface.
    pub y: f64,
    /// Map-derived flood depth estimate in meters.
    pub exposure_estimated: f64,
    /// Realized flood depth in meters.
    pub exposure_actual: f64,
    /// Damage outlook under the household's own mitigation.
    pub damage_estimated: f64,
    /// Realized damage after the latest shock.
    pub damage_actual: f64,
    /// Trailing average of recent realized damage.
    pub attitude: f64,
    /// Political perception after neighbor blending.
    pub political_perception: f64,
    /// Sandbag effort.
    pub sandbags: f64,
    /// Whether flood insurance is currently taken.
    pub insurance_taken: bool,
    /// Whether the household counts as adapted.
    pub is_adapted: bool,
    /// Number of neighbors in the social graph.
    pub friends: u32,
}

/// Observer that accumulates both record tables as a run progresses.
#[derive(Debug, Clone)]
pub struct Recorder {
    /// Model-level rows, one per period, in period order.
    pub model: Vec<ModelRecord>,
    /// Household-level rows in (period, household id) order.
    pub households: Vec<HouseholdRecord>,
}

impl Recorder {
    /// Empty recorder ready to observe a run.
    pub const fn new() -> Self {
        Self {
            model: Vec::new(),
            households: Vec::new(),
        }
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl PeriodObserver for Recorder {
    fn on_period(&mut self, summary: &PeriodSummary, state: &SimulationState) {
        self.model.push(model_record(summary, state));
        for (id, household) in &state.households {
            self.households
                .push(household_record(summary.period, household, state.graph.degree(*id)));
        }
    }
}

const fn model_record(summary: &PeriodSummary, state: &SimulationState) -> ModelRecord {
    ModelRecord {
        period: summary.period,
        adapted_households: summary.adapted_households,
        information_provision: summary.policy.information_provision,
        subsidies: summary.policy.subsidies,
        regulation: summary.policy.regulation,
        infrastructure: summary.policy.infrastructure,
        government_budget: summary.government_budget,
        water_attitude: summary.water_attitude,
        political_situation: state.political_situation,
        protest: summary.protest,
        media_activity: summary.media_activity,
        flooded: summary.flooded,
    }
}

const fn household_record(period: u64, household: &HouseholdState, friends: u32) -> HouseholdRecord {
    HouseholdRecord {
        period,
        household: household.id.into_inner(),
        x: household.location.x,
        y: household.location.y,
        exposure_estimated: household.exposure_estimated,
        exposure_actual: household.exposure_actual,
        damage_estimated: household.damage_estimated,
        damage_actual: household.damage_actual,
        attitude: household.attitude,
        political_perception: household.political_perception,
        sandbags: household.sandbags,
        insurance_taken: household.insurance_taken,
        is_adapted: household.is_adapted,
        friends,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use polder_core::config::{PopulationConfig, RunConfig, SimulationConfig, SocietyConfig};
    use polder_core::runner;
    use polder_types::{HouseholdId, Scenario};

    use super::*;

    fn small_config(seed: u64) -> RunConfig {
        RunConfig {
            simulation: SimulationConfig {
                seed,
                periods: 4,
                scenario: Scenario::Baseline,
            },
            population: PopulationConfig {
                households: 10,
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

    #[test]
    fn one_model_row_per_period() {
        let mut state = SimulationState::build(&small_config(3)).unwrap();
        let mut recorder = Recorder::new();
        let _ = runner::run_simulation(&mut state, &mut recorder, 4).unwrap();

        let periods: Vec<u64> = recorder.model.iter().map(|row| row.period).collect();
        assert_eq!(periods, vec![0, 1, 2, 3]);
        assert_eq!(recorder.households.len(), 40);
    }

    #[test]
    fn household_rows_keep_id_order_within_period() {
        let mut state = SimulationState::build(&small_config(5)).unwrap();
        let mut recorder = Recorder::new();
        let _ = runner::run_simulation(&mut state, &mut recorder, 2).unwrap();

        let first_period: Vec<&HouseholdRecord> = recorder
            .households
            .iter()
            .filter(|row| row.period == 0)
            .collect();
        assert_eq!(first_period.len(), 10);
        for (row, next) in first_period.iter().zip(first_period.iter().skip(1)) {
            assert!(row.household < next.household);
        }
    }

    #[test]
    fn last_rows_mirror_final_state() {
        let mut state = SimulationState::build(&small_config(8)).unwrap();
        let mut recorder = Recorder::new();
        let _ = runner::run_simulation(&mut state, &mut recorder, 4).unwrap();

        let last = recorder.households.last().unwrap();
        assert_eq!(last.period, 3);
        let household = state
            .households
            .get(&HouseholdId::new(last.household))
            .unwrap();
        assert!((last.sandbags - household.sandbags).abs() < f64::EPSILON);
        assert!((last.damage_estimated - household.damage_estimated).abs() < f64::EPSILON);
        assert_eq!(last.insurance_taken, household.insurance_taken);
        assert_eq!(last.is_adapted, household.is_adapted);

        let model = recorder.model.last().unwrap();
        assert!((model.political_situation - 0.6).abs() < f64::EPSILON);
        assert_eq!(model.adapted_households, state.adapted_households());
    }

    #[test]
    fn friends_match_graph_degree() {
        let mut state = SimulationState::build(&small_config(11)).unwrap();
        let mut recorder = Recorder::new();
        let _ = runner::run_simulation(&mut state, &mut recorder, 1).unwrap();

        for row in &recorder.households {
            let id = HouseholdId::new(row.household);
            assert_eq!(row.friends, state.graph.degree(id));
            assert!(row.friends > 0);
        }
    }
}
