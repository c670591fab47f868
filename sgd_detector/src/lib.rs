//! # SGD Detector Library
//!
//! Classifies how close a robot's joint configuration is to a kinematic
//! singularity and publishes a velocity scaling factor every evaluation
//! cycle. Three nested threshold bands per joint map a position vector
//! to a proximity level 0..=3; the published scaling is level + 1.
//!
//! ## Pipeline
//!
//! 1. **Configuration** — TOML limit tables, validated once against the
//!    declared joint count before the first cycle ([`config`]).
//! 2. **Classification** — pure per-cycle mapping of (position, limits)
//!    to a [`sgd_common::level::SingularityLevel`] ([`classify`]).
//! 3. **Evaluation cycle** — thin driver that polls the position
//!    source, classifies on new data, and republishes the retained
//!    scaling otherwise ([`cycle`]).
//!
//! ## Zero-Allocation Cycle
//!
//! Limit tables and the position buffer are sized once at configuration
//! time; the cycle body performs no heap allocation and no blocking.

pub mod classify;
pub mod config;
pub mod cycle;
pub mod replay;
