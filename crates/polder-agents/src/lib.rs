//! Agent state machines and feedback formulas for the Polder simulation.
//!
//! Every formula lives here exactly once, as a pure
//! compute-next-from-current function, so the owning agent's staging and
//! any other agent that needs the same quantity share one implementation.
//! The scheduler stages all agents against committed state and publishes
//! the staged states together; nothing in this crate mutates shared state.
//!
//! # Modules
//!
//! - [`household`] -- Household exposure, social influence, insurance and
//!   sandbag decisions
//! - [`government`] -- Perception blending, the budget, and the warning
//!   system
//! - [`water_authority`] -- Systemwide counterfactual damage and the
//!   adaptation level
//! - [`insurer`] -- Willingness gate and the media-activity flag
//! - [`policy_maker`] -- The four policy-instrument recurrences
//! - [`stats`] -- Trailing-window and mean helpers shared by the formulas

pub mod government;
pub mod household;
pub mod insurer;
pub mod policy_maker;
pub mod stats;
pub mod water_authority;

// Re-export the agent states and staging inputs at crate root.
pub use government::GovernmentState;
pub use household::{HouseholdContext, HouseholdState};
pub use insurer::InsurerState;
pub use policy_maker::PolicyInputs;
pub use water_authority::WaterAuthorityState;
