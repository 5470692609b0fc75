//! Government: perception blending, the budget, and the warning system.

use polder_types::{BudgetWeights, PolicyValues};

use crate::stats::clamp01;

/// Per-period state of the government singleton.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GovernmentState {
    /// Welfare baseline in [0, 1], fixed for the run.
    pub welfare: f64,
    /// Political perception, blended toward the household average each
    /// period and re-clamped to [0, 1].
    pub political_perception: f64,
    /// Budget derived from welfare and perception.
    pub budget: f64,
    /// Warning-system level derived from the policy instruments.
    pub warning_system: f64,
}

impl GovernmentState {
    /// Government at period 0.
    ///
    /// Budget and warning system are derived immediately from the starting
    /// perception and policy values, so no formula ever reads an unset
    /// field.
    pub const fn new(
        welfare: f64,
        political_situation: f64,
        weights: BudgetWeights,
        policy: PolicyValues,
    ) -> Self {
        Self {
            welfare,
            political_perception: political_situation,
            budget: budget(welfare, political_situation, weights),
            warning_system: warning_system(policy),
        }
    }

    /// Staged next state from the current one.
    ///
    /// The budget uses the period's fresh perception; the warning system
    /// reads the current committed policy values. Welfare never changes.
    #[must_use]
    pub const fn stage(
        &self,
        household_perception_mean: f64,
        policy: PolicyValues,
        weights: BudgetWeights,
    ) -> Self {
        let perception =
            next_political_perception(self.political_perception, household_perception_mean);
        Self {
            welfare: self.welfare,
            political_perception: perception,
            budget: budget(self.welfare, perception, weights),
            warning_system: warning_system(policy),
        }
    }
}

/// Blend the government's perception toward the household average,
/// re-clamped to [0, 1].
pub const fn next_political_perception(current: f64, household_mean: f64) -> f64 {
    clamp01(0.5 * current + 0.5 * household_mean)
}

/// Budget from the welfare baseline and a perception value.
pub const fn budget(welfare: f64, perception: f64, weights: BudgetWeights) -> f64 {
    weights.welfare * welfare + weights.perception * perception
}

/// Warning-system level from the current policy instruments.
pub const fn warning_system(policy: PolicyValues) -> f64 {
    3.0 * policy.information_provision + 2.0 * policy.regulation
}
