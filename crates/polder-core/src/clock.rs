//! Period clock for the polder simulation.
//!
//! The clock is the single source of truth for temporal state: it counts
//! completed periods and derives the flood schedule from the counter.
//! Nothing else in the simulation stores the period number.

/// Number of periods between flood events. A flood fires on every
/// positive multiple of this interval; period 0 is never a flood period.
pub const FLOOD_INTERVAL: u64 = 5;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Period counter would overflow.
    #[error("period counter overflow: cannot advance beyond u64::MAX")]
    PeriodOverflow,
}

/// Simulation clock counting periods from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeriodClock {
    /// Current period number (0-indexed).
    period: u64,
}

impl PeriodClock {
    /// Clock at period 0.
    pub const fn new() -> Self {
        Self { period: 0 }
    }

    /// Return the current period number.
    pub const fn period(self) -> u64 {
        self.period
    }

    /// Whether a flood event fires in the current period.
    pub const fn is_flood_period(self) -> bool {
        if self.period == 0 {
            return false;
        }
        match self.period.checked_rem(FLOOD_INTERVAL) {
            Some(remainder) => remainder == 0,
            None => false,
        }
    }

    /// Advance the clock by one period. Returns the new period number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::PeriodOverflow`] if the period counter would
    /// exceed `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.period = self
            .period
            .checked_add(1)
            .ok_or(ClockError::PeriodOverflow)?;
        Ok(self.period)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_period_zero() {
        let clock = PeriodClock::new();
        assert_eq!(clock.period(), 0);
        assert_eq!(clock, PeriodClock::default());
    }

    #[test]
    fn clock_advances() {
        let mut clock = PeriodClock::new();
        assert_eq!(clock.advance().unwrap(), 1);
        assert_eq!(clock.advance().unwrap(), 2);
        assert_eq!(clock.period(), 2);
    }

    #[test]
    fn period_zero_is_dry() {
        let clock = PeriodClock::new();
        assert!(!clock.is_flood_period());
    }

    #[test]
    fn floods_fire_on_positive_multiples_of_the_interval() {
        let mut clock = PeriodClock::new();
        let mut flood_periods = Vec::new();
        for _ in 0..16 {
            let _ = clock.advance().unwrap();
            if clock.is_flood_period() {
                flood_periods.push(clock.period());
            }
        }
        assert_eq!(flood_periods, vec![5, 10, 15]);
    }
}
