//! Record capture and run artifacts for the polder simulation.
//!
//! This crate turns a simulation run into analysis artifacts:
//!
//! - **Recorder** implementing the period-observer hook, capturing the
//!   model-level and household-level record tables after every commit
//! - **CSV export** writing the two tables as `model.csv` and
//!   `agents.csv` with fixed headers and rows in capture order
//! - **Run manifest** (`run.json`) echoing the configuration together
//!   with the outcome and wall-clock timestamps
//!
//! # Determinism
//!
//! Records are captured in (period, household id) order and floats
//! print in shortest round-trip form, so a fixed seed and configuration
//! reproduce the CSV artifacts byte for byte.

pub mod error;
pub mod export;
pub mod recorder;

// Re-export primary types for convenience.
pub use error::ExportError;
pub use export::{export_run, RunManifest};
pub use recorder::{HouseholdRecord, ModelRecord, Recorder};
