//! Period cycle: the five-phase loop that drives the polder simulation.
//!
//! Each period runs through these phases:
//!
//! 1. **Exogenous draws** -- every stochastic input of the period is drawn
//!    up front from the run's single random stream, the per-household
//!    vectors filled in household-id order: flood recession and surge
//!    factors, damage-estimate noise, the protest indicator, and insurer
//!    media activity. The flood shock is then applied to realized
//!    exposures and realized damage is recomputed.
//!
//! 2. **Stage** -- every agent's next state is computed from the current
//!    committed state and the period's draws only. Staging never touches
//!    the random stream and never reads another agent's staged value, so
//!    the iteration order cannot influence the result. Agents whose
//!    formulas need another agent's next-period value recompute it through
//!    that agent's own staging function instead of peeking at a buffer.
//!
//! 3. **Commit** -- all staged states are published at once.
//!
//! 4. **Observe** -- the observer sees the just-committed state.
//!
//! 5. **Advance** -- the period counter increments (checked).
//!
//! The cycle is deterministic given the same seed and configuration.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use polder_agents::{
    GovernmentState, HouseholdContext, HouseholdState, InsurerState, PolicyInputs,
    WaterAuthorityState, policy_maker, stats, water_authority,
};
use polder_types::{HouseholdId, PolicyValues, Scenario};
use polder_world::{FloodSurface, SocialGraph, WorldError, basic_damage};

use crate::clock::{ClockError, PeriodClock};
use crate::config::RunConfig;
use crate::observe::PeriodObserver;

/// Lower bound of the per-period exposure recession factor.
const RECESSION_MIN: f64 = 0.2;
/// Upper bound of the per-period exposure recession factor.
const RECESSION_MAX: f64 = 0.5;
/// Lower bound of the flood-period surge factor.
const SURGE_MIN: f64 = 0.4;
/// Upper bound of the flood-period surge factor.
const SURGE_MAX: f64 = 0.9;
/// Half-width of the uniform noise added to staged damage estimates.
const DAMAGE_NOISE: f64 = 0.1;

/// Errors that can occur while building the simulation or running a
/// period.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// Building the social graph or the flood surface failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// A parameter combination that can never produce a valid run.
    #[error("invalid run configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },

    /// A household's neighbor set yields no perception values to average.
    #[error("household {household} has no neighbors to average over")]
    UndefinedNeighborhood {
        /// The household whose perception update is undefined.
        household: HouseholdId,
    },

    /// The population is empty, so cross-agent averages are undefined.
    #[error("cross-agent averages are undefined for an empty population")]
    EmptyPopulation,
}

/// Summary of a single period's execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// The period number that was executed.
    pub period: u64,
    /// Whether a flood event fired this period.
    pub flooded: bool,
    /// Whether a protest took place this period.
    pub protest: bool,
    /// Whether the insurer ran a media campaign this period.
    pub media_activity: bool,
    /// Households whose sandbag effort clears the adaptation threshold.
    pub adapted_households: u32,
    /// Committed policy instrument values.
    pub policy: PolicyValues,
    /// Committed government budget.
    pub government_budget: f64,
    /// Committed water-authority attitude.
    pub water_attitude: f64,
}

/// Pre-drawn stochastic inputs for one period.
///
/// All draws happen before any staging, in a fixed sequence (recessions,
/// surges, noise, protest, media) with the per-household vectors filled
/// in household-id order, so the seed pins the whole period.
#[derive(Debug, Clone)]
struct PeriodDraws {
    /// Per-household recession factor in [0.2, 0.5).
    recessions: Vec<f64>,
    /// Per-household surge factor in [0.4, 0.9); present on flood periods
    /// only.
    surges: Option<Vec<f64>>,
    /// Per-household damage-estimate noise in [-0.1, 0.1).
    damage_noise: Vec<f64>,
    /// Whether a protest takes place this period.
    protest: bool,
    /// Whether the insurer runs a media campaign this period.
    media_activity: bool,
}

/// Staged next states for every agent, computed from committed state.
struct StagedPeriod {
    /// Staged household states keyed by id.
    households: BTreeMap<HouseholdId, HouseholdState>,
    /// Staged government singleton.
    government: GovernmentState,
    /// Staged water-authority singleton.
    water_authority: WaterAuthorityState,
    /// Staged insurer singleton.
    insurer: InsurerState,
    /// Staged policy instrument values.
    policy: PolicyValues,
}

/// The mutable simulation state passed through the period cycle.
///
/// Households are keyed by id in a `BTreeMap`, so every iteration over
/// them follows the same fixed ordering.
#[derive(Debug)]
pub struct SimulationState {
    /// The period clock.
    pub clock: PeriodClock,
    /// Scenario regime selecting the recurrence coefficients.
    pub scenario: Scenario,
    /// Political situation in [0, 1], fixed for the run.
    pub political_situation: f64,
    /// Welfare baseline in [0, 1], fixed for the run.
    pub welfare: f64,
    /// Static social graph over the households.
    pub graph: SocialGraph,
    /// Household states keyed by id.
    pub households: BTreeMap<HouseholdId, HouseholdState>,
    /// Government singleton.
    pub government: GovernmentState,
    /// Water-authority singleton.
    pub water_authority: WaterAuthorityState,
    /// Insurer singleton.
    pub insurer: InsurerState,
    /// Current policy instrument values.
    pub policy: PolicyValues,
    /// The run's single random stream; every draw flows through it.
    pub rng: ChaCha8Rng,
}

impl SimulationState {
    /// Build and validate a simulation from its configuration.
    ///
    /// Construction draws everything the run needs in a fixed order:
    /// society inputs that were absent or out of range, the social graph,
    /// household locations, and household endowments. A state that builds
    /// successfully runs without further validation.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::InvalidConfig`] for a savings range that
    /// cannot be drawn from, and [`TickError::World`] for population,
    /// topology, or surface parameters that cannot produce a valid world
    /// (including topologies that leave a household without neighbors).
    pub fn build(config: &RunConfig) -> Result<Self, TickError> {
        let population = &config.population;
        if population.savings_min < 0.0 || population.savings_max < population.savings_min {
            return Err(TickError::InvalidConfig {
                reason: format!(
                    "savings range [{}, {}] must be non-negative and ordered",
                    population.savings_min, population.savings_max
                ),
            });
        }

        let mut rng = ChaCha8Rng::seed_from_u64(config.simulation.seed);
        let scenario = config.simulation.scenario;

        let political_situation = resolve_society_input(
            "political_situation",
            config.society.political_situation,
            &mut rng,
        );
        let welfare = resolve_society_input("welfare", config.society.welfare, &mut rng);

        let graph = SocialGraph::generate(population.households, &config.network, &mut rng)?;
        graph.validate()?;

        let surface = FloodSurface::synthetic(&config.surface, config.simulation.seed)?;

        let mut households = BTreeMap::new();
        for id in graph.ids() {
            let location = surface.sample_point(&mut rng);
            let raw_depth = surface.depth_at(location);
            let household = HouseholdState::spawn(
                id,
                location,
                raw_depth,
                political_situation,
                population.savings_min,
                population.savings_max,
                &mut rng,
            );
            households.insert(id, household);
        }

        let policy = PolicyValues::initial();
        let government =
            GovernmentState::new(welfare, political_situation, scenario.budget_weights(), policy);
        let water_authority = WaterAuthorityState::new(policy);
        let insurer = InsurerState::new();

        info!(
            scenario = %scenario,
            households = households.len(),
            topology = %graph.topology(),
            political_situation,
            welfare,
            "Simulation state built"
        );

        Ok(Self {
            clock: PeriodClock::new(),
            scenario,
            political_situation,
            welfare,
            graph,
            households,
            government,
            water_authority,
            insurer,
            policy,
            rng,
        })
    }

    /// Number of households whose sandbag effort clears the adaptation
    /// threshold.
    pub fn adapted_households(&self) -> u32 {
        let adapted = self
            .households
            .values()
            .filter(|household| household.is_adapted)
            .count();
        u32::try_from(adapted).unwrap_or(u32::MAX)
    }
}

/// Execute one complete period of the simulation.
///
/// Runs the five phases in order and returns a summary of the committed
/// state. The observer sees the state after commit and before the clock
/// advances, so `summary.period` and `state.clock.period()` agree inside
/// the callback.
///
/// # Errors
///
/// Returns [`TickError`] if a cross-agent average is undefined or the
/// period counter overflows. A validated state never produces the
/// former.
pub fn run_period(
    state: &mut SimulationState,
    observer: &mut dyn PeriodObserver,
) -> Result<PeriodSummary, TickError> {
    let period = state.clock.period();
    let flooded = state.clock.is_flood_period();

    // --- Phase 1: exogenous draws and the flood shock ---
    let draws = draw_period_inputs(state, flooded);
    apply_flood_shock(state, &draws);

    // --- Phase 2: stage against the committed state ---
    let staged = stage_period(state, &draws)?;

    // --- Phase 3: commit ---
    state.households = staged.households;
    state.government = staged.government;
    state.water_authority = staged.water_authority;
    state.insurer = staged.insurer;
    state.policy = staged.policy;
    warn_on_policy_drift(period, state.policy);

    let summary = PeriodSummary {
        period,
        flooded,
        protest: draws.protest,
        media_activity: draws.media_activity,
        adapted_households: state.adapted_households(),
        policy: state.policy,
        government_budget: state.government.budget,
        water_attitude: state.water_authority.attitude,
    };
    info!(
        period,
        flooded,
        protest = summary.protest,
        adapted = summary.adapted_households,
        budget = summary.government_budget,
        "Period committed"
    );

    // --- Phase 4: observe ---
    observer.on_period(&summary, state);

    // --- Phase 5: advance the clock ---
    state.clock.advance()?;

    Ok(summary)
}

/// Resolve a configured society input, drawing a replacement uniformly
/// from [0, 1) when the value is absent or out of range.
fn resolve_society_input(name: &str, configured: Option<f64>, rng: &mut impl Rng) -> f64 {
    match configured {
        Some(value) if (0.0..=1.0).contains(&value) => value,
        Some(value) => {
            let drawn = rng.random_range(0.0..1.0);
            warn!(
                input = name,
                value, drawn, "society input out of [0, 1], drawing uniformly"
            );
            drawn
        }
        None => {
            let drawn = rng.random_range(0.0..1.0);
            warn!(
                input = name,
                drawn, "society input not configured, drawing uniformly"
            );
            drawn
        }
    }
}

/// Phase 1a: draw every stochastic input the period needs, in a fixed
/// sequence.
fn draw_period_inputs(state: &mut SimulationState, flooded: bool) -> PeriodDraws {
    let count = state.households.len();
    let rng = &mut state.rng;

    let recessions: Vec<f64> = (0..count)
        .map(|_| rng.random_range(RECESSION_MIN..RECESSION_MAX))
        .collect();
    let surges: Option<Vec<f64>> = flooded.then(|| {
        (0..count)
            .map(|_| rng.random_range(SURGE_MIN..SURGE_MAX))
            .collect()
    });
    let damage_noise: Vec<f64> = (0..count)
        .map(|_| rng.random_range(-DAMAGE_NOISE..DAMAGE_NOISE))
        .collect();
    let protest = rng.random_bool(0.5);
    let media_activity = rng.random_bool(0.5);

    PeriodDraws {
        recessions,
        surges,
        damage_noise,
        protest,
        media_activity,
    }
}

/// Phase 1b: apply recession and any flood surge to realized exposures,
/// then recompute realized damage under current mitigation.
///
/// Mitigation softens the damage function only; the raw recession and
/// surge amounts ignore every adaptation choice.
fn apply_flood_shock(state: &mut SimulationState, draws: &PeriodDraws) {
    for (household, &recession) in state.households.values_mut().zip(&draws.recessions) {
        household.exposure_actual =
            (household.exposure_actual - recession * household.exposure_estimated).max(0.0);
    }

    if let Some(surges) = &draws.surges {
        debug!(period = state.clock.period(), "Flood event fired");
        for (household, &surge) in state.households.values_mut().zip(surges) {
            household.exposure_actual += surge * household.exposure_estimated;
        }
    }

    let adaptation = state.water_authority.adaptation_level;
    let warning = state.government.warning_system;
    let infrastructure = state.policy.infrastructure;
    for household in state.households.values_mut() {
        household.damage_actual = basic_damage(
            household.exposure_actual,
            household.sandbags,
            adaptation,
            warning,
            infrastructure,
        );
    }
}

/// Phase 2: compute every agent's staged state from the committed state
/// and the period's draws.
fn stage_period(state: &SimulationState, draws: &PeriodDraws) -> Result<StagedPeriod, TickError> {
    let perceptions: Vec<f64> = state
        .households
        .values()
        .map(|household| household.political_perception)
        .collect();
    let household_perception_mean =
        stats::mean(&perceptions).ok_or(TickError::EmptyPopulation)?;

    let exposures: Vec<f64> = state
        .households
        .values()
        .map(|household| household.exposure_actual)
        .collect();
    let systemwide_damage = water_authority::counterfactual_mean_damage(
        &exposures,
        state.water_authority.adaptation_level,
        state.government.warning_system,
        state.policy.infrastructure,
    );

    let government = state.government.stage(
        household_perception_mean,
        state.policy,
        state.scenario.budget_weights(),
    );
    let staged_water = state.water_authority.stage(systemwide_damage, state.policy);
    let insurer = InsurerState::stage(draws.media_activity);
    let policy_inputs = PolicyInputs {
        government_budget: state.government.budget,
        government_perception: state.government.political_perception,
        water_attitude: state.water_authority.attitude,
        protest: draws.protest,
    };
    let policy = policy_maker::stage(state.policy, &policy_inputs, state.scenario.policy_memory());

    let mut households = BTreeMap::new();
    for ((id, household), &noise) in state.households.iter().zip(&draws.damage_noise) {
        let ctx = household_context(state, *id, draws, noise)?;
        households.insert(*id, household.stage(&ctx));
    }

    Ok(StagedPeriod {
        households,
        government,
        water_authority: staged_water,
        insurer,
        policy,
    })
}

/// Assemble the committed-state context one household's staging reads.
fn household_context(
    state: &SimulationState,
    id: HouseholdId,
    draws: &PeriodDraws,
    damage_noise: f64,
) -> Result<HouseholdContext, TickError> {
    let neighbor_perceptions: Vec<f64> = state
        .graph
        .neighbors(id)
        .iter()
        .filter_map(|neighbor| state.households.get(neighbor))
        .map(|neighbor| neighbor.political_perception)
        .collect();
    let neighbor_perception_mean = stats::mean(&neighbor_perceptions)
        .ok_or(TickError::UndefinedNeighborhood { household: id })?;

    Ok(HouseholdContext {
        policy: state.policy,
        water_adaptation: state.water_authority.adaptation_level,
        warning_system: state.government.warning_system,
        media_activity: draws.media_activity,
        neighbor_perception_mean,
        attitude_window: state.scenario.attitude_window(),
        damage_noise,
    })
}

/// Report any committed policy value outside [0, 1].
///
/// Policy values are not clamped; drift past the unit interval is logged
/// once per instrument per period and left untouched.
fn warn_on_policy_drift(period: u64, policy: PolicyValues) {
    if policy.in_nominal_range() {
        return;
    }
    let instruments = [
        ("information_provision", policy.information_provision),
        ("subsidies", policy.subsidies),
        ("regulation", policy.regulation),
        ("infrastructure", policy.infrastructure),
    ];
    for (instrument, value) in instruments {
        if !(0.0..=1.0).contains(&value) {
            warn!(period, instrument, value, "policy value drifted outside [0, 1]");
        }
    }
}
