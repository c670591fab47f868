//! Replay position source for offline runs.
//!
//! Feeds the evaluation cycle from a CSV-style text file instead of a
//! live producer: one row of comma-separated joint positions per
//! cycle, a blank row for a cycle with no new sample, `#` lines as
//! comments. Parsing happens entirely at load time; polling is
//! allocation-free.

use heapless::Vec as FixedVec;

use sgd_common::consts::MAX_JOINTS;
use sgd_common::limits::JointPositions;

use crate::cycle::{Poll, PositionSource};

/// Replay file parse error.
#[derive(Debug)]
pub enum ReplayError {
    /// Replay file could not be read.
    Io { path: String, message: String },
    /// A row had the wrong number of values.
    FieldCount {
        line: usize,
        actual: usize,
        expected: usize,
    },
    /// A value failed to parse as a float.
    BadValue {
        line: usize,
        field: usize,
        value: String,
    },
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "failed to read {path}: {message}"),
            Self::FieldCount {
                line,
                actual,
                expected,
            } => write!(
                f,
                "line {line}: {actual} values, should be: {expected}"
            ),
            Self::BadValue { line, field, value } => {
                write!(f, "line {line}, field {field}: not a number: {value:?}")
            }
        }
    }
}

impl std::error::Error for ReplayError {}

/// Pre-parsed replay rows, consumed one per cycle.
#[derive(Debug)]
pub struct ReplaySource {
    rows: Vec<Option<FixedVec<f64, MAX_JOINTS>>>,
    cursor: usize,
}

impl ReplaySource {
    /// Load a replay file. Every row must carry exactly `joint_count`
    /// values; blank rows mean "no new sample this cycle".
    pub fn load(path: &std::path::Path, joint_count: usize) -> Result<Self, ReplayError> {
        let text = std::fs::read_to_string(path).map_err(|e| ReplayError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&text, joint_count)
    }

    /// Parse replay rows from text (for testing).
    pub fn parse(text: &str, joint_count: usize) -> Result<Self, ReplayError> {
        let mut rows = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.starts_with('#') {
                continue;
            }
            if trimmed.is_empty() {
                rows.push(None);
                continue;
            }

            let mut sample = FixedVec::new();
            let fields: Vec<&str> = trimmed.split(',').collect();
            if fields.len() != joint_count {
                return Err(ReplayError::FieldCount {
                    line,
                    actual: fields.len(),
                    expected: joint_count,
                });
            }
            for (field, raw_value) in fields.iter().enumerate() {
                let value: f64 = raw_value.trim().parse().map_err(|_| ReplayError::BadValue {
                    line,
                    field: field + 1,
                    value: raw_value.trim().to_string(),
                })?;
                // Capacity holds joint_count <= MAX_JOINTS values.
                let _ = sample.push(value);
            }
            rows.push(Some(sample));
        }
        Ok(Self { rows, cursor: 0 })
    }

    /// Number of cycles this replay drives.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the replay contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl PositionSource for ReplaySource {
    fn try_latest(&mut self, out: &mut JointPositions) -> Poll {
        match self.rows.get(self.cursor) {
            Some(Some(sample)) => {
                self.cursor += 1;
                if out.copy_from(sample) {
                    Poll::NewSample
                } else {
                    // Row length is checked at parse time against the
                    // same joint count the buffer was sized with.
                    Poll::NoSample
                }
            }
            Some(None) => {
                self.cursor += 1;
                Poll::NoSample
            }
            None => Poll::Exhausted,
        }
    }
}
