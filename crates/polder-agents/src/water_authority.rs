//! Water authority: systemwide damage signal and adaptation level.
//!
//! Once per period the authority computes the mean damage all households
//! would take at their realized exposure if none had placed sandbags,
//! under the current system-level mitigation. That counterfactual scalar
//! feeds only the authority's own attitude; it never flows back into
//! household state.

use polder_types::PolicyValues;
use polder_world::basic_damage;

use crate::stats::{mean, trailing_sum};

/// Number of trailing damage entries feeding the authority's attitude.
pub const ATTITUDE_WINDOW: usize = 5;

/// Per-period state of the water authority singleton.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterAuthorityState {
    /// Attitude derived from recent systemwide damage, at least 0.5 by
    /// construction.
    pub attitude: f64,
    /// Adaptation level on rivers and drainages.
    pub adaptation_level: f64,
    /// Append-only history of the systemwide counterfactual damage.
    pub damage_history: Vec<f64>,
}

impl WaterAuthorityState {
    /// Authority at period 0: a dry history, the floor attitude, and the
    /// adaptation level that follows from both.
    pub fn new(policy: PolicyValues) -> Self {
        let damage_history = vec![0.0; ATTITUDE_WINDOW];
        let attitude = attitude_from_history(&damage_history);
        Self {
            attitude,
            adaptation_level: adaptation_level(policy, attitude),
            damage_history,
        }
    }

    /// Staged next state: append the period's systemwide damage, refresh
    /// the attitude from the trailing window, and rederive the adaptation
    /// level from the fresh attitude and current policy values.
    #[must_use]
    pub fn stage(&self, systemwide_damage: f64, policy: PolicyValues) -> Self {
        let mut damage_history = self.damage_history.clone();
        damage_history.push(systemwide_damage);
        let attitude = attitude_from_history(&damage_history);
        Self {
            attitude,
            adaptation_level: adaptation_level(policy, attitude),
            damage_history,
        }
    }
}

/// Attitude from the trailing damage window, floored at 0.5 by
/// construction since damage entries are non-negative.
pub fn attitude_from_history(history: &[f64]) -> f64 {
    0.5 + trailing_sum(history, ATTITUDE_WINDOW) / 10.0
}

/// Adaptation level from the current instruments and an attitude value.
pub const fn adaptation_level(policy: PolicyValues, attitude: f64) -> f64 {
    policy.information_provision + 3.0 * policy.regulation + 3.0 * attitude
}

/// Mean damage across the given realized exposures with zero sandbag
/// effort, under the given system-level mitigation. Returns 0 for an
/// empty population.
pub fn counterfactual_mean_damage(
    exposures: &[f64],
    adaptation: f64,
    warning_system: f64,
    infrastructure: f64,
) -> f64 {
    let damages: Vec<f64> = exposures
        .iter()
        .map(|&depth| basic_damage(depth, 0.0, adaptation, warning_system, infrastructure))
        .collect();
    mean(&damages).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_attitude_sits_on_the_floor() {
        let state = WaterAuthorityState::new(PolicyValues::initial());
        assert!((state.attitude - 0.5).abs() < f64::EPSILON);
        assert!((state.adaptation_level - 3.5).abs() < 1e-12);
        assert_eq!(state.damage_history.len(), ATTITUDE_WINDOW);
    }

    #[test]
    fn attitude_grows_with_recent_damage() {
        let history = vec![1.0; ATTITUDE_WINDOW];
        assert!((attitude_from_history(&history) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn attitude_window_ignores_old_entries() {
        let mut history = vec![1.0; 500];
        history.extend([0.0; ATTITUDE_WINDOW]);
        assert!((attitude_from_history(&history) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn staging_appends_and_rederives() {
        let policy = PolicyValues::initial();
        let state = WaterAuthorityState::new(policy);
        let staged = state.stage(1.0, policy);
        assert_eq!(staged.damage_history.len(), ATTITUDE_WINDOW + 1);
        assert!((staged.attitude - 0.6).abs() < 1e-12);
        let expected = adaptation_level(policy, staged.attitude);
        assert!((staged.adaptation_level - expected).abs() < f64::EPSILON);
        assert_eq!(state.damage_history.len(), ATTITUDE_WINDOW);
    }

    #[test]
    fn counterfactual_matches_sandbag_free_damage() {
        let exposures = [2.0, 0.0];
        let got = counterfactual_mean_damage(&exposures, 3.5, 2.5, 0.5);
        let wet = basic_damage(2.0, 0.0, 3.5, 2.5, 0.5);
        let dry = basic_damage(0.0, 0.0, 3.5, 2.5, 0.5);
        let expected = mean(&[wet, dry]).unwrap_or(0.0);
        assert!((got - expected).abs() < 1e-12);
        assert!(wet > dry);
    }

    #[test]
    fn counterfactual_over_no_households_is_zero() {
        assert!(counterfactual_mean_damage(&[], 3.5, 2.5, 0.5).abs() < f64::EPSILON);
    }
}
