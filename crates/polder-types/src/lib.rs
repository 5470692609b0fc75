//! Shared type definitions for the Polder flood-adaptation simulation.
//!
//! This crate is the single source of truth for the small vocabulary of
//! types every other Polder crate speaks: household identifiers, the four
//! policy scalars, scenario regimes, and network topology families.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe household identifier tied to the social-graph node
//!   index
//! - [`policy`] -- The four policy-instrument scalars published by the
//!   policy maker
//! - [`scenario`] -- Scenario regimes and the coefficient knobs they select
//! - [`topology`] -- Social-network topology families

pub mod ids;
pub mod policy;
pub mod scenario;
pub mod topology;

// Re-export all public types at crate root for convenience.
pub use ids::HouseholdId;
pub use policy::{INITIAL_POLICY_VALUE, PolicyValues};
pub use scenario::{BudgetWeights, PolicyMemory, Scenario};
pub use topology::Topology;
