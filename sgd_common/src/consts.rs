//! Compiled capacity limits and configuration defaults.
//!
//! All buffers in the detector are sized against [`MAX_JOINTS`] at
//! compile time so the evaluation cycle never allocates.

use static_assertions::const_assert;

/// Maximum number of controlled joints supported by a single detector.
///
/// Limit band tables and the position buffer are fixed-capacity
/// `heapless::Vec<f64, MAX_JOINTS>`; a configured `joint_count` above
/// this value is rejected at validation time.
pub const MAX_JOINTS: usize = 32;

/// Default evaluation cycle period [µs] when the config omits it.
pub const DEFAULT_CYCLE_TIME_US: u32 = 1000;

/// Number of proximity bands per joint (levels 1..=3).
pub const BAND_COUNT: usize = 3;

// Position buffers are copied by value each cycle; keep them small.
const_assert!(MAX_JOINTS <= 64);
const_assert!(MAX_JOINTS >= 1);
