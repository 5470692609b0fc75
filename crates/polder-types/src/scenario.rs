//! Scenario regimes and the coefficient knobs they select.
//!
//! A scenario names a variant of the policy and government recurrences,
//! chosen once at configuration time. Three knobs vary:
//!
//! - **Policy memory**: whether the policy maker's recurrences keep their
//!   own prior value as an inertial term, or drop it and renormalize
//!   (memoryless, instantly responsive policy).
//! - **Budget weights**: the welfare/perception mix in the government
//!   budget, swapped under the welfare-prioritizing regime.
//! - **Attitude window**: how many recent damage entries feed the household
//!   attitude average.
//!
//! The two sweep scenarios share baseline mechanics; they exist so
//! experiment batches can label runs that vary the political situation or
//! welfare inputs across a value grid.

use serde::{Deserialize, Serialize};

/// Named coefficient/structure variant of the feedback recurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    /// Inertial policy, standard budget weights, five-period attitude
    /// window.
    Baseline,
    /// Baseline mechanics; experiment batches sweep the political
    /// situation input across runs.
    PoliticalSituationSweep,
    /// Baseline mechanics; experiment batches sweep the welfare input
    /// across runs.
    WelfareSweep,
    /// Memoryless policy recurrences, otherwise baseline knobs.
    MemorylessPolicyA,
    /// Memoryless policy recurrences with a welfare-prioritizing budget
    /// and a shortened three-period attitude window.
    MemorylessPolicyB,
}

/// Whether policy recurrences carry their own prior value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyMemory {
    /// Recurrences blend the instrument's prior value with the new inputs.
    Inertial,
    /// The prior-value term is dropped and the remaining weights
    /// renormalized; policy tracks current inputs only.
    Memoryless,
}

/// Coefficients of the government budget formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetWeights {
    /// Weight on the welfare baseline.
    pub welfare: f64,
    /// Weight on the government's political perception.
    pub perception: f64,
}

impl Scenario {
    /// Policy-memory regime selected by this scenario.
    pub const fn policy_memory(self) -> PolicyMemory {
        match self {
            Self::Baseline | Self::PoliticalSituationSweep | Self::WelfareSweep => {
                PolicyMemory::Inertial
            }
            Self::MemorylessPolicyA | Self::MemorylessPolicyB => PolicyMemory::Memoryless,
        }
    }

    /// Budget coefficients selected by this scenario.
    pub const fn budget_weights(self) -> BudgetWeights {
        match self {
            Self::MemorylessPolicyB => BudgetWeights {
                welfare: 1.4,
                perception: 0.6,
            },
            _ => BudgetWeights {
                welfare: 0.6,
                perception: 1.4,
            },
        }
    }

    /// Number of trailing damage entries feeding the household attitude.
    pub const fn attitude_window(self) -> usize {
        match self {
            Self::MemorylessPolicyB => 3,
            _ => 5,
        }
    }
}

impl core::fmt::Display for Scenario {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Baseline => "baseline",
            Self::PoliticalSituationSweep => "political-situation-sweep",
            Self::WelfareSweep => "welfare-sweep",
            Self::MemorylessPolicyA => "memoryless-policy-a",
            Self::MemorylessPolicyB => "memoryless-policy-b",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn sweeps_share_baseline_mechanics() {
        for scenario in [Scenario::PoliticalSituationSweep, Scenario::WelfareSweep] {
            assert_eq!(scenario.policy_memory(), PolicyMemory::Inertial);
            assert_eq!(scenario.attitude_window(), 5);
            let weights = scenario.budget_weights();
            assert!((weights.welfare - 0.6).abs() < f64::EPSILON);
            assert!((weights.perception - 1.4).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn memoryless_b_selects_all_three_knobs() {
        let scenario = Scenario::MemorylessPolicyB;
        assert_eq!(scenario.policy_memory(), PolicyMemory::Memoryless);
        assert_eq!(scenario.attitude_window(), 3);
        let weights = scenario.budget_weights();
        assert!((weights.welfare - 1.4).abs() < f64::EPSILON);
        assert!((weights.perception - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn serde_names_are_kebab_case() {
        let json = serde_json::to_string(&Scenario::MemorylessPolicyA).unwrap();
        assert_eq!(json, "\"memoryless-policy-a\"");
        let back: Scenario = serde_json::from_str("\"welfare-sweep\"").unwrap();
        assert_eq!(back, Scenario::WelfareSweep);
    }
}
