//! The four policy-instrument scalars published by the policy maker.
//!
//! Every other institutional agent polls these values each period: the
//! government derives its warning-system level from them, the water
//! authority folds them into its adaptation level, the insurer gates
//! willingness on their sum, and households weigh them in the insurance and
//! sandbag decisions.
//!
//! The scalars are nominally in [0, 1] but deliberately not clamped: under
//! some coefficient regimes (notably a large government budget) subsidies
//! and infrastructure drift above 1. Downstream code treats that drift as a
//! model-validity signal, not an error.

use serde::{Deserialize, Serialize};

/// Starting value of every policy instrument at period 0.
pub const INITIAL_POLICY_VALUE: f64 = 0.5;

/// Current values of the four policy instruments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyValues {
    /// Level of flood-risk information provision to the public.
    pub information_provision: f64,
    /// Level of adaptation subsidies offered to households.
    pub subsidies: f64,
    /// Strength of flood-related building and zoning regulation.
    pub regulation: f64,
    /// Level of public protective infrastructure investment.
    pub infrastructure: f64,
}

impl PolicyValues {
    /// All four instruments at their period-0 starting value.
    pub const fn initial() -> Self {
        Self {
            information_provision: INITIAL_POLICY_VALUE,
            subsidies: INITIAL_POLICY_VALUE,
            regulation: INITIAL_POLICY_VALUE,
            infrastructure: INITIAL_POLICY_VALUE,
        }
    }

    /// Sum of the four instruments, the quantity the insurer gates on.
    pub const fn sum(self) -> f64 {
        self.information_provision + self.subsidies + self.regulation + self.infrastructure
    }

    /// Whether every instrument currently sits inside its nominal [0, 1]
    /// range.
    pub fn in_nominal_range(self) -> bool {
        [
            self.information_provision,
            self.subsidies,
            self.regulation,
            self.infrastructure,
        ]
        .iter()
        .all(|v| (0.0..=1.0).contains(v))
    }
}

impl Default for PolicyValues {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_values_sum_to_two() {
        let p = PolicyValues::initial();
        assert!((p.sum() - 2.0).abs() < f64::EPSILON);
        assert!(p.in_nominal_range());
    }

    #[test]
    fn drifted_value_leaves_nominal_range() {
        let p = PolicyValues {
            subsidies: 1.3,
            ..PolicyValues::initial()
        };
        assert!(!p.in_nominal_range());
    }
}
