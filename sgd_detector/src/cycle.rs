//! Deterministic evaluation cycle: poll → classify → publish.
//!
//! The driver is intentionally thin — all per-cycle behavior of the
//! detector lives here and nowhere else:
//!
//! 1. Poll the position source for the newest sample.
//! 2. On a new sample, classify and set `scaling = level + 1`.
//! 3. On no sample, retain the previous scaling.
//! 4. Publish the scaling unconditionally, every cycle.
//!
//! The source and sink are trait seams so the algorithm stays decoupled
//! from any scheduling or transport mechanism; the cycle body is
//! synchronous, non-blocking, and allocation-free.

use std::time::{Duration, Instant};

use tracing::debug;

use sgd_common::config::DetectorConfig;
use sgd_common::level::{ScalingFactor, SingularityLevel};
use sgd_common::limits::{JointPositions, LimitTable};

use crate::classify::classify;

// ─── Source / Sink Seams ────────────────────────────────────────────

/// Outcome of polling the position source for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// A new sample was written into the buffer.
    NewSample,
    /// No new sample this cycle. Normal condition, not an error; the
    /// previous output is retained.
    NoSample,
    /// The source will never produce again (end of a replay). The
    /// cycle loop exits.
    Exhausted,
}

/// Producer of joint position samples.
///
/// `try_latest` must fill `out` with exactly `out.len()` values when it
/// returns [`Poll::NewSample`], and must not block.
pub trait PositionSource {
    fn try_latest(&mut self, out: &mut JointPositions) -> Poll;
}

/// Consumer of the published scaling factor.
pub trait ScalingSink {
    fn publish(&mut self, scaling: ScalingFactor);
}

// ─── Cycle Statistics ───────────────────────────────────────────────

/// O(1) per-cycle timing statistics. Updated every cycle with no
/// allocation.
#[derive(Debug, Clone)]
pub struct CycleStats {
    /// Total cycles executed.
    pub cycle_count: u64,
    /// Cycles that carried a new position sample.
    pub sample_count: u64,
    /// Last cycle duration [ns].
    pub last_cycle_ns: i64,
    /// Minimum cycle duration [ns].
    pub min_cycle_ns: i64,
    /// Maximum cycle duration [ns].
    pub max_cycle_ns: i64,
    /// Running sum for average computation.
    pub sum_cycle_ns: i64,
}

impl CycleStats {
    /// Create a new zeroed stats instance.
    pub const fn new() -> Self {
        Self {
            cycle_count: 0,
            sample_count: 0,
            last_cycle_ns: 0,
            min_cycle_ns: i64::MAX,
            max_cycle_ns: 0,
            sum_cycle_ns: 0,
        }
    }

    /// Record a cycle duration. O(1), no allocation.
    #[inline]
    pub fn record(&mut self, duration_ns: i64, had_sample: bool) {
        self.cycle_count += 1;
        if had_sample {
            self.sample_count += 1;
        }
        self.last_cycle_ns = duration_ns;
        if duration_ns < self.min_cycle_ns {
            self.min_cycle_ns = duration_ns;
        }
        if duration_ns > self.max_cycle_ns {
            self.max_cycle_ns = duration_ns;
        }
        self.sum_cycle_ns += duration_ns;
    }

    /// Average cycle time [ns] (returns 0 if no cycles).
    #[inline]
    pub fn avg_cycle_ns(&self) -> i64 {
        if self.cycle_count == 0 {
            0
        } else {
            self.sum_cycle_ns / self.cycle_count as i64
        }
    }
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Cycle Runner ───────────────────────────────────────────────────

/// Owns the validated limit table, the pre-allocated position buffer,
/// and the retained scaling output between cycles.
///
/// Construct only from a configuration that passed
/// [`crate::config::validate`]; the cycle body indexes the limit
/// tables by joint and relies on the one-time size check.
pub struct CycleRunner<S, K> {
    limits: LimitTable,
    position: JointPositions,
    level: SingularityLevel,
    scaling: ScalingFactor,
    stats: CycleStats,
    cycle_time: Duration,
    source: S,
    sink: K,
}

impl<S: PositionSource, K: ScalingSink> CycleRunner<S, K> {
    /// Create a runner from a validated configuration.
    ///
    /// The scaling output starts at 1 (no scaling) and holds that
    /// value until the first position sample arrives.
    pub fn new(config: &DetectorConfig, source: S, sink: K) -> Self {
        Self {
            limits: config.limits.clone(),
            position: JointPositions::zeroed(config.joint_count),
            level: SingularityLevel::None,
            scaling: ScalingFactor::NO_SCALING,
            stats: CycleStats::new(),
            cycle_time: Duration::from_micros(config.cycle_time_us as u64),
            source,
            sink,
        }
    }

    /// Execute one evaluation cycle.
    ///
    /// Publishes the scaling output on every call except when the
    /// source reports [`Poll::Exhausted`], which ends operation.
    pub fn tick(&mut self) -> Poll {
        let poll = self.source.try_latest(&mut self.position);
        match poll {
            Poll::NewSample => {
                self.level = classify(&self.limits, self.position.as_slice());
                self.scaling = self.level.scaling();
            }
            Poll::NoSample => {
                // Retain the previous level and scaling.
            }
            Poll::Exhausted => return poll,
        }
        self.sink.publish(self.scaling);
        poll
    }

    /// Run ticks at the configured period until the source is
    /// exhausted.
    ///
    /// Pacing uses `std::thread::sleep` on the remaining slice of the
    /// period — the detector is normally invoked by an external
    /// real-time scheduler calling [`CycleRunner::tick`] directly, so
    /// this loop only needs replay-grade timing.
    pub fn run(&mut self) {
        loop {
            let cycle_start = Instant::now();

            let poll = self.tick();
            if poll == Poll::Exhausted {
                debug!("position source exhausted after {} cycles", self.stats.cycle_count);
                return;
            }

            let elapsed = cycle_start.elapsed();
            self.stats
                .record(elapsed.as_nanos() as i64, poll == Poll::NewSample);

            if let Some(remaining) = self.cycle_time.checked_sub(elapsed) {
                std::thread::sleep(remaining);
            }
        }
    }

    /// Last classified proximity level.
    pub fn level(&self) -> SingularityLevel {
        self.level
    }

    /// Currently retained scaling output.
    pub fn scaling(&self) -> ScalingFactor {
        self.scaling
    }

    /// Cycle timing statistics.
    pub fn stats(&self) -> &CycleStats {
        &self.stats
    }
}
