//! Singularity proximity scale.
//!
//! `SingularityLevel` is the classifier result (0 = clear, 3 = inside
//! the innermost band on at least one joint). `ScalingFactor` is the
//! value published downstream every cycle: level + 1, in 1..=4,
//! consumed as a velocity attenuation denominator.

use serde::{Deserialize, Serialize};

/// Proximity to a kinematic singularity.
///
/// Ordered: `High > Medium > Low > None`, so the per-joint maximum can
/// be taken with `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SingularityLevel {
    /// Outside every configured band.
    None = 0,
    /// Inside a level-1 band (outermost zone).
    Low = 1,
    /// Inside a level-2 band.
    Medium = 2,
    /// Inside a level-3 band (innermost zone, closest to singularity).
    High = 3,
}

impl SingularityLevel {
    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            _ => None,
        }
    }

    /// Raw level value in 0..=3.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// The scaling factor published for this level: level + 1.
    #[inline]
    pub const fn scaling(self) -> ScalingFactor {
        ScalingFactor(self as u8 + 1)
    }
}

impl Default for SingularityLevel {
    fn default() -> Self {
        Self::None
    }
}

/// Published velocity scaling factor, always in 1..=4.
///
/// Constructed only from a [`SingularityLevel`]; starts at
/// [`ScalingFactor::NO_SCALING`] before the first position sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScalingFactor(u8);

impl ScalingFactor {
    /// Scaling for level 0: motion unattenuated.
    pub const NO_SCALING: Self = Self(1);

    /// Raw published value in 1..=4.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for ScalingFactor {
    fn default() -> Self {
        Self::NO_SCALING
    }
}

impl std::fmt::Display for ScalingFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
