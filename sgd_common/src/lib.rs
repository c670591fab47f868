//! SGD Common Library
//!
//! Shared types for the singularity proximity detector: the proximity
//! level scale, the per-joint limit band tables, the fixed-capacity
//! joint position buffer, and the TOML configuration structures with
//! their error type.
//!
//! # Module Structure
//!
//! - [`consts`] - Compiled capacity limits and defaults
//! - [`level`] - `SingularityLevel` and `ScalingFactor`
//! - [`limits`] - `LimitBand`, `LimitTable`, `JointPositions`
//! - [`config`] - `DetectorConfig` TOML structures and `ConfigError`

pub mod config;
pub mod consts;
pub mod level;
pub mod limits;
