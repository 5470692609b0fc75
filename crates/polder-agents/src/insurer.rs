//! Insurer: the willingness gate and the media-activity flag.

use polder_types::PolicyValues;

/// Combined policy level the instruments must exceed before the insurer
/// offers cover at all.
pub const WILLINGNESS_POLICY_THRESHOLD: f64 = 2.0;

/// Estimated-damage level at and above which the insurer refuses cover.
pub const WILLINGNESS_DAMAGE_CEILING: f64 = 0.6;

/// Per-period state of the insurer singleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsurerState {
    /// Whether the insurer runs a media campaign this period, an exogenous
    /// fair-coin draw.
    pub media_activity: bool,
}

impl InsurerState {
    /// Insurer at period 0, before any media draw.
    pub const fn new() -> Self {
        Self {
            media_activity: false,
        }
    }

    /// Staged next state carrying the period's media draw.
    pub const fn stage(media_activity: bool) -> Self {
        Self { media_activity }
    }
}

impl Default for InsurerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Hard threshold gate, not a smooth function: willing iff the combined
/// policy level clears the threshold strictly and the household's damage
/// estimate sits strictly under the ceiling.
pub const fn willingness(policy: PolicyValues, damage_estimate: f64) -> bool {
    policy.sum() > WILLINGNESS_POLICY_THRESHOLD && damage_estimate < WILLINGNESS_DAMAGE_CEILING
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy_with_sum(total: f64) -> PolicyValues {
        PolicyValues {
            information_provision: total / 4.0,
            subsidies: total / 4.0,
            regulation: total / 4.0,
            infrastructure: total / 4.0,
        }
    }

    #[test]
    fn weak_policy_blocks_cover_regardless_of_damage() {
        let policy = policy_with_sum(2.0);
        assert!(!willingness(policy, 0.0));
        assert!(!willingness(policy, 0.95));
    }

    #[test]
    fn initial_policy_values_sit_exactly_on_the_gate() {
        assert!(!willingness(PolicyValues::initial(), 0.0));
    }

    #[test]
    fn high_damage_estimates_are_refused() {
        let policy = policy_with_sum(2.4);
        assert!(willingness(policy, 0.59));
        assert!(!willingness(policy, 0.6));
        assert!(!willingness(policy, 0.9));
    }

    #[test]
    fn media_flag_starts_quiet() {
        assert!(!InsurerState::new().media_activity);
        assert!(InsurerState::stage(true).media_activity);
    }
}
