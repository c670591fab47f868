//! Configuration loading and one-time validation.
//!
//! Loads `DetectorConfig` from a TOML file and checks the limit tables
//! against the declared joint count. Validation runs exactly once,
//! before the first evaluation cycle; a failure keeps the detector in a
//! non-operating state. The per-cycle path never re-validates.

use std::path::Path;

use tracing::error;

use sgd_common::config::{BandSide, ConfigError, DetectorConfig, LimitSizeMismatch};
use sgd_common::consts::MAX_JOINTS;
use sgd_common::limits::LimitTable;

/// Load and validate the detector configuration from a TOML file.
///
/// Every failure — unreadable file, parse error, out-of-range joint
/// count, mismatched limit sequence — is logged at the configuration
/// boundary and returned as a [`ConfigError`]; nothing propagates as a
/// panic.
pub fn load_config(path: &Path) -> Result<DetectorConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        let err = ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        error!("{err}");
        err
    })?;
    load_config_from_str(&text)
}

/// Load and validate from TOML text (for testing).
pub fn load_config_from_str(text: &str) -> Result<DetectorConfig, ConfigError> {
    let config = DetectorConfig::from_toml(text).inspect_err(|e| error!("{e}"))?;
    validate(&config)?;
    Ok(config)
}

/// Validate a parsed configuration.
///
/// Checks:
/// 1. `joint_count` in `1..=MAX_JOINTS`.
/// 2. All six limit sequences (lower/upper × 3 bands) have length
///    exactly `joint_count`.
///
/// The size sweep does not short-circuit: every mismatched sequence is
/// logged individually and collected into the returned error, so a
/// broken config surfaces all its problems in one pass.
pub fn validate(config: &DetectorConfig) -> Result<(), ConfigError> {
    if config.joint_count == 0 || config.joint_count > MAX_JOINTS {
        let err = ConfigError::JointCountOutOfRange(config.joint_count);
        error!("{err}");
        return Err(err);
    }
    validate_limit_sizes(config.joint_count, &config.limits)
}

/// Check that every limit sequence has length exactly `joint_count`.
pub fn validate_limit_sizes(
    joint_count: usize,
    limits: &LimitTable,
) -> Result<(), ConfigError> {
    let mut mismatches = Vec::new();

    for (level, band) in limits.bands() {
        for (side, seq) in [(BandSide::Lower, &band.lower), (BandSide::Upper, &band.upper)] {
            if seq.len() != joint_count {
                let m = LimitSizeMismatch {
                    level,
                    side,
                    actual: seq.len(),
                    expected: joint_count,
                };
                error!("{m}");
                mismatches.push(m);
            }
        }
    }

    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::LimitSizes(mismatches))
    }
}
