//! Small numeric helpers shared by the agent formulas.
//!
//! Damage histories are append-only: a trailing window reads at most the
//! last `k` entries and the history itself is never truncated or
//! reordered.

/// Sum of the last `k` entries of an append-only history.
pub fn trailing_sum(history: &[f64], k: usize) -> f64 {
    history.iter().rev().take(k).sum()
}

/// Mean of the last `k` entries of an append-only history, or 0 for an
/// empty history.
pub fn trailing_mean(history: &[f64], k: usize) -> f64 {
    let taken = history.len().min(k);
    let Ok(count) = u32::try_from(taken) else {
        return 0.0;
    };
    if count == 0 {
        return 0.0;
    }
    trailing_sum(history, k) / f64::from(count)
}

/// Mean of a slice, or `None` when it is empty.
pub fn mean(values: &[f64]) -> Option<f64> {
    let count = u32::try_from(values.len()).ok()?;
    if count == 0 {
        return None;
    }
    Some(values.iter().sum::<f64>() / f64::from(count))
}

/// Clamp a scalar into [0, 1].
pub const fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// 1.0 for `true`, 0.0 for `false`; threshold outputs enter the weighted
/// sums as hard indicators.
pub const fn indicator(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn trailing_window_reads_at_most_k_entries() {
        let mut history = vec![9.0, 9.0, 9.0];
        history.extend([1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((trailing_sum(&history, 5) - 15.0).abs() < f64::EPSILON);
        assert!((trailing_mean(&history, 5) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn long_histories_do_not_change_the_window() {
        let mut history = vec![0.0; 2000];
        history.extend([0.2, 0.4, 0.6]);
        assert!((trailing_mean(&history, 3) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn short_history_divides_by_what_was_read() {
        let history = [0.5, 0.7];
        assert!((trailing_mean(&history, 5) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn empty_slices_are_handled() {
        assert!(trailing_mean(&[], 5).abs() < f64::EPSILON);
        assert!(mean(&[]).is_none());
    }

    #[test]
    fn mean_of_uniform_values_is_the_value() {
        let values = [0.3; 7];
        let m = mean(&values).unwrap();
        assert!((m - 0.3).abs() < 1e-12);
    }

    #[test]
    fn indicator_is_zero_or_one() {
        assert!((indicator(true) - 1.0).abs() < f64::EPSILON);
        assert!(indicator(false).abs() < f64::EPSILON);
    }
}
