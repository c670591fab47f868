//! Detector configuration structures and error type.
//!
//! The on-disk shape is a single TOML file:
//!
//! ```toml
//! joint_count = 2
//! cycle_time_us = 1000
//!
//! [limits.level1]
//! lower = [-0.2, -0.2]
//! upper = [0.2, 0.2]
//!
//! [limits.level2]
//! lower = [-0.1, -0.1]
//! upper = [0.1, 0.1]
//!
//! [limits.level3]
//! lower = [-0.05, -0.05]
//! upper = [0.05, 0.05]
//! ```
//!
//! Parsing lives here; size validation against `joint_count` lives in
//! `sgd_detector::config`, which runs it once before the first cycle.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_CYCLE_TIME_US, MAX_JOINTS};
use crate::limits::LimitTable;

/// Complete detector configuration as parsed from TOML.
///
/// Immutable after validation succeeds; the evaluation cycle only
/// reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Number of controlled joints. Must be in `1..=MAX_JOINTS` and
    /// match the length of every limit sequence.
    pub joint_count: usize,
    /// Evaluation cycle period [µs].
    #[serde(default = "default_cycle_time_us")]
    pub cycle_time_us: u32,
    /// The three proximity bands.
    pub limits: LimitTable,
}

fn default_cycle_time_us() -> u32 {
    DEFAULT_CYCLE_TIME_US
}

/// Which side of a band a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandSide {
    Lower,
    Upper,
}

impl std::fmt::Display for BandSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lower => write!(f, "lower"),
            Self::Upper => write!(f, "upper"),
        }
    }
}

/// One limit sequence whose length does not match the joint count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitSizeMismatch {
    /// Proximity level of the offending band (1..=3).
    pub level: u8,
    /// Lower or upper sequence.
    pub side: BandSide,
    /// Length found in the configuration.
    pub actual: usize,
    /// Required length (= joint count).
    pub expected: usize,
}

impl std::fmt::Display for LimitSizeMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "level {} {} limits wrong size: {}, should be: {}",
            self.level, self.side, self.actual, self.expected
        )
    }
}

/// Configuration loading/validation error.
///
/// Any of these keeps the detector in a non-operating state; the
/// periodic evaluation must not start.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// TOML parse error.
    #[error("config parse error: {0}")]
    Parse(String),

    /// Joint count outside the supported range.
    #[error("joint_count {0} out of range [1, {MAX_JOINTS}]")]
    JointCountOutOfRange(usize),

    /// One or more limit sequences mismatched against the joint count.
    ///
    /// Carries every failure found, not just the first; the validator
    /// checks all six sequences before giving up.
    #[error("limit table validation failed ({} mismatched sequences)", .0.len())]
    LimitSizes(Vec<LimitSizeMismatch>),
}

impl DetectorConfig {
    /// Parse a config from TOML text. Size validation is a separate,
    /// explicit step (`sgd_detector::config::validate`).
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
