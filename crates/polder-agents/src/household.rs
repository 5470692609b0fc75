//! Households: exposure, social influence, and the adaptation decisions.
//!
//! A household reads the committed state of every institutional singleton
//! plus its neighbors' perception average, then decides on insurance,
//! sandbag effort, and its own damage outlook for the next period. All of
//! that happens in [`HouseholdState::stage`]; realized exposure is touched
//! only by the flood shock, never by the household itself.

use polder_types::{HouseholdId, PolicyValues};
use polder_world::{Point, basic_damage, depth_damage};
use rand::Rng;

use crate::insurer;
use crate::stats::{clamp01, indicator, trailing_mean};

/// Half-width of the uniform jitter applied to the starting perception.
pub const PERCEPTION_JITTER: f64 = 0.3;

/// Dry years seeded into the damage history before the first period.
pub const SEED_HISTORY_LEN: usize = 4;

/// Score a household's insurance drivers must reach before it takes cover.
pub const INSURANCE_THRESHOLD: f64 = 1.5;

/// Sandbag effort above which a household counts as adapted.
pub const ADAPTATION_SANDBAG_THRESHOLD: f64 = 6.0;

/// Divisor turning raw savings into the formulas' wealth term.
pub const SAVINGS_SCALE: f64 = 1000.0;

/// Per-period state of one household.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseholdState {
    /// Identity, equal to the social-graph node index.
    pub id: HouseholdId,
    /// Fixed location on the flood surface.
    pub location: Point,
    /// Map-derived flood depth estimate in meters, non-negative.
    pub exposure_estimated: f64,
    /// Realized flood depth in meters, moved only by the flood shock.
    pub exposure_actual: f64,
    /// Damage outlook in [0, 1] under the household's own mitigation.
    pub damage_estimated: f64,
    /// Realized damage in [0, 1], recomputed after each shock.
    pub damage_actual: f64,
    /// Monetary wealth proxy, positive and fixed for the run.
    pub savings: f64,
    /// Whether flood insurance is currently taken.
    pub insurance_taken: bool,
    /// Whether sandbag effort clears the adaptation threshold.
    pub is_adapted: bool,
    /// Trailing average of recent realized damage.
    pub attitude: f64,
    /// Political perception in [0, 1], diffused through the social graph.
    pub political_perception: f64,
    /// Sandbag effort, clamped to be non-negative.
    pub sandbags: f64,
    /// Append-only record of realized damage, one entry per period plus
    /// the seeded dry years.
    pub damage_history: Vec<f64>,
}

/// Read-only cross-agent context a household stages against.
///
/// Every field carries current committed state or the period's pre-drawn
/// randomness; nothing here reflects another agent's staged buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseholdContext {
    /// Current policy instrument values.
    pub policy: PolicyValues,
    /// Water authority's current adaptation level.
    pub water_adaptation: f64,
    /// Government's current warning-system level.
    pub warning_system: f64,
    /// Whether the insurer runs a media campaign this period.
    pub media_activity: bool,
    /// Mean political perception over the household's neighbors.
    pub neighbor_perception_mean: f64,
    /// Trailing damage entries feeding the attitude average.
    pub attitude_window: usize,
    /// Pre-drawn noise on the damage estimate, in [-0.1, 0.1].
    pub damage_noise: f64,
}

impl HouseholdState {
    /// Create a household at `location` from the surface's raw depth
    /// reading.
    ///
    /// Raw depths are negative on elevated terrain and clamp to zero. The
    /// initial damage estimate uses the unmitigated curve, since nobody
    /// has placed sandbags yet. Perception starts at the political
    /// situation plus uniform jitter, re-clamped to [0, 1], and the
    /// damage history opens with the seeded dry years plus the initial
    /// realized damage.
    pub fn spawn<R: Rng>(
        id: HouseholdId,
        location: Point,
        raw_depth: f64,
        political_situation: f64,
        savings_min: f64,
        savings_max: f64,
        rng: &mut R,
    ) -> Self {
        let political_perception =
            clamp01(political_situation + rng.random_range(-PERCEPTION_JITTER..PERCEPTION_JITTER));
        let savings = rng.random_range(savings_min..=savings_max);

        let exposure_estimated = raw_depth.max(0.0);
        let damage_estimated = depth_damage(exposure_estimated);
        let damage_actual = depth_damage(0.0);
        let mut damage_history = vec![0.0; SEED_HISTORY_LEN];
        damage_history.push(damage_actual);

        Self {
            id,
            location,
            exposure_estimated,
            exposure_actual: 0.0,
            damage_estimated,
            damage_actual,
            savings,
            insurance_taken: false,
            is_adapted: false,
            attitude: 0.0,
            political_perception,
            sandbags: 0.0,
            damage_history,
        }
    }

    /// Staged next state from the current one.
    ///
    /// # Order of operations
    ///
    /// 1. Append this period's realized damage to the history
    /// 2. Attitude from the trailing window of the history
    /// 3. Blend political perception toward the neighbor average
    /// 4. Insurer willingness against the current damage estimate
    /// 5. Insurance decision (hard threshold)
    /// 6. Sandbag effort, clamped to be non-negative
    /// 7. Adaptation flag from the sandbag effort
    /// 8. Damage estimate under the new effort plus drawn noise
    #[must_use]
    pub fn stage(&self, ctx: &HouseholdContext) -> Self {
        // 1. Extend the damage record with this period's realized damage
        let mut damage_history = self.damage_history.clone();
        damage_history.push(self.damage_actual);

        // 2. Attitude over the trailing window
        let attitude = trailing_mean(&damage_history, ctx.attitude_window);

        // 3. Social blend of political perception, re-clamped
        let political_perception =
            clamp01(0.3 * self.political_perception + 0.7 * ctx.neighbor_perception_mean);

        // 4. Insurer willingness, gated on the pre-update damage estimate
        let willing = insurer::willingness(ctx.policy, self.damage_estimated);

        // 5. Insurance decision
        let insurance_score = 0.3 * ctx.policy.subsidies
            + 0.3 * indicator(willing)
            + 0.3 * indicator(ctx.media_activity)
            + 0.5 * ctx.policy.infrastructure
            + 0.1 * (self.savings / SAVINGS_SCALE)
            + 0.3 * attitude;
        let insurance_taken = insurance_score >= INSURANCE_THRESHOLD;

        // 6. Sandbag effort; insurance crowds it out, infrastructure even
        //    more so
        let sandbags = (2.0 * ctx.policy.information_provision
            + 3.0 * ctx.policy.subsidies
            + 2.0 * ctx.policy.regulation
            - 5.0 * ctx.policy.infrastructure
            - 3.0 * indicator(insurance_taken)
            + (self.savings / SAVINGS_SCALE)
            + 3.0 * attitude)
            .max(0.0);

        // 7. Adapted once the effort clears the threshold
        let is_adapted = sandbags > ADAPTATION_SANDBAG_THRESHOLD;

        // 8. Damage outlook under the new effort and current system levers
        let damage_estimated = (basic_damage(
            self.exposure_estimated,
            sandbags,
            ctx.water_adaptation,
            ctx.warning_system,
            ctx.policy.infrastructure,
        ) + ctx.damage_noise)
            .clamp(0.0, 1.0);

        Self {
            id: self.id,
            location: self.location,
            exposure_estimated: self.exposure_estimated,
            exposure_actual: self.exposure_actual,
            damage_estimated,
            damage_actual: self.damage_actual,
            savings: self.savings,
            insurance_taken,
            is_adapted,
            attitude,
            political_perception,
            sandbags,
            damage_history,
        }
    }
}
