//! Policy maker: the four instrument recurrences.
//!
//! Each instrument follows a linear recurrence in the government budget,
//! the government's political perception, the water authority's attitude,
//! and (except infrastructure) the protest indicator, normalized by the
//! divisor of its weights. Under the inertial regime the instrument's own
//! prior value enters the sum; under the memoryless regime the prior term
//! is dropped and the divisor renormalized, so policy tracks current
//! inputs only.
//!
//! The outputs are not clamped to [0, 1]: a large government budget can
//! push subsidies and infrastructure above 1. Callers treat that drift as
//! a model-validity signal, not an error.

use polder_types::{PolicyMemory, PolicyValues};

use crate::stats::indicator;

/// Cross-agent inputs read by every policy recurrence.
///
/// Budget, perception, and attitude are current committed values; the
/// protest indicator is the period's exogenous draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyInputs {
    /// Government budget.
    pub government_budget: f64,
    /// Government's political perception.
    pub government_perception: f64,
    /// Water authority's attitude.
    pub water_attitude: f64,
    /// Whether a protest takes place this period.
    pub protest: bool,
}

/// Next information-provision level.
pub const fn next_information_provision(
    prior: f64,
    inputs: &PolicyInputs,
    memory: PolicyMemory,
) -> f64 {
    let drive = 0.1 * inputs.government_budget
        + 0.3 * inputs.government_perception
        + 0.2 * inputs.water_attitude
        + 0.1 * indicator(inputs.protest);
    match memory {
        PolicyMemory::Inertial => (prior + drive) / 1.7,
        PolicyMemory::Memoryless => drive / 0.7,
    }
}

/// Next subsidies level. The whole recurrence scales with the budget, so
/// this is the instrument most prone to drifting above 1.
pub const fn next_subsidies(prior: f64, inputs: &PolicyInputs, memory: PolicyMemory) -> f64 {
    let drive = 0.3 * inputs.government_perception
        + 0.2 * inputs.water_attitude
        + 0.1 * indicator(inputs.protest);
    match memory {
        PolicyMemory::Inertial => inputs.government_budget * (prior + drive) / 3.0,
        PolicyMemory::Memoryless => inputs.government_budget * drive / 2.0,
    }
}

/// Next regulation level.
pub const fn next_regulation(prior: f64, inputs: &PolicyInputs, memory: PolicyMemory) -> f64 {
    let drive = 0.05 * inputs.government_budget
        + 0.2 * inputs.government_perception
        + 0.05 * inputs.water_attitude
        + 0.1 * indicator(inputs.protest);
    match memory {
        PolicyMemory::Inertial => (prior + drive) / 1.4,
        PolicyMemory::Memoryless => drive / 0.4,
    }
}

/// Next infrastructure level. Protest does not enter this recurrence.
pub const fn next_infrastructure(prior: f64, inputs: &PolicyInputs, memory: PolicyMemory) -> f64 {
    let drive = 0.2 * inputs.government_budget
        + 0.3 * inputs.government_perception
        + 0.2 * inputs.water_attitude;
    match memory {
        PolicyMemory::Inertial => (prior + drive) / 1.9,
        PolicyMemory::Memoryless => drive / 0.9,
    }
}

/// Staged next values of all four instruments from the current ones.
pub const fn stage(
    current: PolicyValues,
    inputs: &PolicyInputs,
    memory: PolicyMemory,
) -> PolicyValues {
    PolicyValues {
        information_provision: next_information_provision(
            current.information_provision,
            inputs,
            memory,
        ),
        subsidies: next_subsidies(current.subsidies, inputs, memory),
        regulation: next_regulation(current.regulation, inputs, memory),
        infrastructure: next_infrastructure(current.infrastructure, inputs, memory),
    }
}
