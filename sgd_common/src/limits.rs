//! Limit band tables and the joint position buffer.
//!
//! A band is an open interval `(lower[i], upper[i])` per joint; the
//! table holds three bands of increasing proximity. All sequences are
//! fixed-capacity so nothing here allocates after configuration.

use heapless::Vec as FixedVec;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_JOINTS;

/// Per-joint lower/upper limits for one proximity band.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LimitBand {
    /// Lower limit per joint (open bound).
    pub lower: FixedVec<f64, MAX_JOINTS>,
    /// Upper limit per joint (open bound).
    pub upper: FixedVec<f64, MAX_JOINTS>,
}

impl LimitBand {
    /// Build a band from slices. Returns `None` if either slice
    /// exceeds [`MAX_JOINTS`].
    pub fn from_slices(lower: &[f64], upper: &[f64]) -> Option<Self> {
        Some(Self {
            lower: FixedVec::from_slice(lower).ok()?,
            upper: FixedVec::from_slice(upper).ok()?,
        })
    }

    /// True if joint `i` sits strictly inside this band.
    ///
    /// Boundary-equal positions are outside: comparisons are strict,
    /// no epsilon tolerance.
    #[inline]
    pub fn contains(&self, i: usize, position: f64) -> bool {
        self.lower[i] < position && position < self.upper[i]
    }
}

/// The three proximity bands, level 1 (outermost) to level 3 (innermost).
///
/// Bands are checked independently per joint; nesting of level 3
/// inside level 2 inside level 1 is the operator's responsibility and
/// is deliberately not enforced.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LimitTable {
    /// Level-1 band (outermost zone).
    pub level1: LimitBand,
    /// Level-2 band.
    pub level2: LimitBand,
    /// Level-3 band (innermost zone).
    pub level3: LimitBand,
}

impl LimitTable {
    /// Bands paired with their proximity level, for validation sweeps.
    pub fn bands(&self) -> [(u8, &LimitBand); 3] {
        [(1, &self.level1), (2, &self.level2), (3, &self.level3)]
    }
}

/// Fixed-capacity joint position buffer.
///
/// Sized once at configuration time and overwritten in place every
/// cycle a new sample arrives; length equals the configured joint
/// count for the lifetime of the detector.
#[derive(Debug, Clone, PartialEq)]
pub struct JointPositions(FixedVec<f64, MAX_JOINTS>);

impl JointPositions {
    /// Create a zeroed buffer for `joint_count` joints.
    ///
    /// # Panics
    /// Panics if `joint_count > MAX_JOINTS`; the count must have been
    /// range-checked at configuration time.
    pub fn zeroed(joint_count: usize) -> Self {
        let mut v = FixedVec::new();
        v.resize(joint_count, 0.0)
            .expect("joint_count validated against MAX_JOINTS");
        Self(v)
    }

    /// Overwrite the buffer from a sample of exactly the same length.
    ///
    /// Returns `false` (buffer untouched) on length mismatch.
    #[inline]
    pub fn copy_from(&mut self, sample: &[f64]) -> bool {
        if sample.len() != self.0.len() {
            return false;
        }
        self.0.copy_from_slice(sample);
        true
    }

    /// Number of joints.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if sized for zero joints (never the case after validation).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Positions in joint index order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_contains_is_strict() {
        let band = LimitBand::from_slices(&[-0.2], &[0.2]).unwrap();
        assert!(band.contains(0, 0.0));
        assert!(band.contains(0, 0.199));
        // Exact boundaries fall outside.
        assert!(!band.contains(0, -0.2));
        assert!(!band.contains(0, 0.2));
        assert!(!band.contains(0, 5.0));
    }

    #[test]
    fn band_from_oversized_slice_rejected() {
        let too_long = [0.0; MAX_JOINTS + 1];
        assert!(LimitBand::from_slices(&too_long, &too_long).is_none());
    }

    #[test]
    fn positions_zeroed_and_copy() {
        let mut pos = JointPositions::zeroed(3);
        assert_eq!(pos.len(), 3);
        assert_eq!(pos.as_slice(), &[0.0, 0.0, 0.0]);

        assert!(pos.copy_from(&[1.0, 2.0, 3.0]));
        assert_eq!(pos.as_slice(), &[1.0, 2.0, 3.0]);

        // Length mismatch leaves the buffer untouched.
        assert!(!pos.copy_from(&[1.0, 2.0]));
        assert_eq!(pos.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn table_bands_in_level_order() {
        let table = LimitTable::default();
        let levels: Vec<u8> = table.bands().iter().map(|(l, _)| *l).collect();
        assert_eq!(levels, vec![1, 2, 3]);
    }
}
