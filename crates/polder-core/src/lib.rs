//! Period clock, two-phase update cycle, and orchestration for the
//! polder simulation.
//!
//! This crate owns the 5-phase period cycle that drives the model:
//! Exogenous Draws, Stage, Commit, Observe, and Advance.
//!
//! # Modules
//!
//! - [`clock`] -- Period counter with checked advancement and the
//!   five-period flood interval.
//! - [`config`] -- Configuration loading from `polder-config.yaml` into
//!   strongly-typed structs.
//! - [`experiment`] -- Sweep batches and control/treatment run pairs.
//! - [`observe`] -- [`PeriodObserver`] trait and [`NoOpObserver`].
//! - [`runner`] -- Bounded simulation loop over the period cycle.
//! - [`tick`] -- The 5-phase period cycle and the simulation state.
//!
//! [`PeriodObserver`]: observe::PeriodObserver
//! [`NoOpObserver`]: observe::NoOpObserver

pub mod clock;
pub mod config;
pub mod experiment;
pub mod observe;
pub mod runner;
pub mod tick;
