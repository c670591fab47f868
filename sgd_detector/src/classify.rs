//! Per-cycle singularity classification.
//!
//! Pure, deterministic, allocation-free. Precondition: the limit table
//! has been validated against the position length (one-time check in
//! [`crate::config`]); the hot path does not re-check and stays
//! branch-light.

use sgd_common::level::SingularityLevel;
use sgd_common::limits::LimitTable;

/// Local proximity level of joint `i` at `position`.
///
/// Bands are tested innermost-first with strict open-interval bounds.
/// Each band is checked independently — a joint can satisfy band 1 but
/// not band 2 if the operator configured non-nested ranges, and the
/// classifier trusts the configuration as given.
#[inline]
pub fn joint_level(limits: &LimitTable, i: usize, position: f64) -> SingularityLevel {
    if limits.level3.contains(i, position) {
        SingularityLevel::High
    } else if limits.level2.contains(i, position) {
        SingularityLevel::Medium
    } else if limits.level1.contains(i, position) {
        SingularityLevel::Low
    } else {
        SingularityLevel::None
    }
}

/// Overall proximity level: the maximum local level across all joints.
///
/// A joint at level 3 ends the scan early — 3 is the top of the scale,
/// so the result is identical to scanning to completion.
pub fn classify(limits: &LimitTable, position: &[f64]) -> SingularityLevel {
    let mut max = SingularityLevel::None;
    for (i, &p) in position.iter().enumerate() {
        let local = joint_level(limits, i, p);
        if local == SingularityLevel::High {
            return SingularityLevel::High;
        }
        if local > max {
            max = local;
        }
    }
    max
}
