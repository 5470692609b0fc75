//! Observer seam for per-period reporting.
//!
//! Implementations receive each period's summary together with read-only
//! access to the just-committed state, before the clock advances. An
//! observer records; it never mutates simulation state.

use crate::tick::{PeriodSummary, SimulationState};

/// Callback invoked after each period commits.
pub trait PeriodObserver {
    /// Called once per committed period.
    fn on_period(&mut self, summary: &PeriodSummary, state: &SimulationState);
}

/// An observer that records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl PeriodObserver for NoOpObserver {
    fn on_period(&mut self, _summary: &PeriodSummary, _state: &SimulationState) {}
}
