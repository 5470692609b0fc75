//! Depth-damage curve shared by every damage computation in the model.
//!
//! One implementation serves three callers: household staging (damage
//! estimates), the per-period flood shock (realized damage), and the water
//! authority's systemwide counterfactual. The unmitigated curve is
//! piecewise: structures stay dry below a small threshold depth, damage
//! saturates at full loss for deep flooding, and in between it follows a
//! logarithmic depth-damage relation. Mitigation terms (private sandbags
//! and the three system-level levers) subtract linearly and the result is
//! clamped back into [0, 1], since heavy mitigation can push the raw value
//! negative.

/// Depth in meters below which a structure takes no damage.
pub const MIN_WET_DEPTH: f64 = 0.025;

/// Depth in meters at which damage saturates at total loss.
pub const MAX_DAMAGE_DEPTH: f64 = 6.0;

/// Slope of the logarithmic depth-damage relation.
const LOG_COEFFICIENT: f64 = 0.1746;

/// Offset of the logarithmic depth-damage relation.
const LOG_OFFSET: f64 = 0.6483;

/// Damage reduction per unit of sandbag effort.
const SANDBAG_MITIGATION: f64 = 0.01;

/// Damage reduction per unit of water-authority adaptation level.
const WATER_ADAPTATION_MITIGATION: f64 = 0.005;

/// Damage reduction per unit of warning-system level.
const WARNING_MITIGATION: f64 = 0.01;

/// Damage reduction per unit of infrastructure investment.
const INFRASTRUCTURE_MITIGATION: f64 = 0.02;

/// Unmitigated damage fraction for a given flood depth in meters.
///
/// Monotone non-decreasing in depth, 0 for dry structures, 1 at
/// [`MAX_DAMAGE_DEPTH`] and beyond. Negative depths (elevated terrain)
/// count as dry.
pub fn depth_damage(depth: f64) -> f64 {
    if depth >= MAX_DAMAGE_DEPTH {
        1.0
    } else if depth < MIN_WET_DEPTH {
        0.0
    } else {
        (LOG_COEFFICIENT * depth.ln() + LOG_OFFSET).clamp(0.0, 1.0)
    }
}

/// Damage fraction for a flood depth under the given mitigation levels.
///
/// The mitigation terms reduce the unmitigated [`depth_damage`] value
/// linearly; the result is clamped to [0, 1].
pub fn basic_damage(
    depth: f64,
    sandbags: f64,
    water_adaptation: f64,
    warning_system: f64,
    infrastructure: f64,
) -> f64 {
    let mitigated = depth_damage(depth)
        - SANDBAG_MITIGATION * sandbags
        - WATER_ADAPTATION_MITIGATION * water_adaptation
        - WARNING_MITIGATION * warning_system
        - INFRASTRUCTURE_MITIGATION * infrastructure;
    mitigated.clamp(0.0, 1.0)
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn dry_and_negative_depths_take_no_damage() {
        assert!(depth_damage(0.0).abs() < f64::EPSILON);
        assert!(depth_damage(-2.5).abs() < f64::EPSILON);
        assert!(depth_damage(0.02).abs() < f64::EPSILON);
    }

    #[test]
    fn damage_saturates_at_deep_flooding() {
        assert!((depth_damage(6.0) - 1.0).abs() < f64::EPSILON);
        assert!((depth_damage(25.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn damage_is_monotone_in_depth() {
        let depths = [0.03, 0.1, 0.5, 1.0, 2.0, 4.0, 5.9];
        for pair in depths.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            assert!(depth_damage(lo) <= depth_damage(hi), "{lo} vs {hi}");
        }
    }

    #[test]
    fn curve_stays_in_unit_interval() {
        for step in 0..160 {
            let depth = f64::from(step) * 0.05;
            let d = depth_damage(depth);
            assert!((0.0..=1.0).contains(&d), "depth {depth} gave {d}");
        }
    }

    #[test]
    fn mitigation_reduces_but_never_inverts_damage() {
        let unmitigated = basic_damage(2.0, 0.0, 0.0, 0.0, 0.0);
        let mitigated = basic_damage(2.0, 4.0, 3.5, 2.5, 0.5);
        assert!(mitigated < unmitigated);
        assert!(mitigated >= 0.0);
    }

    #[test]
    fn extreme_mitigation_clamps_at_zero() {
        let d = basic_damage(0.5, 100.0, 100.0, 100.0, 100.0);
        assert!(d.abs() < f64::EPSILON);
    }
}
