//! End-to-end detector tests: TOML config on disk → validation →
//! replay-driven evaluation cycle → published scaling values.

use std::io::Write;

use sgd_common::config::ConfigError;
use sgd_common::level::ScalingFactor;
use sgd_detector::config::{load_config, load_config_from_str};
use sgd_detector::cycle::{CycleRunner, Poll, ScalingSink};
use sgd_detector::replay::ReplaySource;

// ─── Helpers ────────────────────────────────────────────────────────

/// Two-joint config: band1 (-0.2,0.2), band2 (0.3,0.4), band3 (0.5,0.6)
/// on both joints — band 1 is the only band covering 0.0.
const TWO_JOINT_TOML: &str = r#"
joint_count = 2
cycle_time_us = 1000

[limits.level1]
lower = [-0.2, -0.2]
upper = [0.2, 0.2]

[limits.level2]
lower = [0.3, 0.3]
upper = [0.4, 0.4]

[limits.level3]
lower = [0.5, 0.5]
upper = [0.6, 0.6]
"#;

/// Six-joint config with nested bands on every joint.
fn six_joint_toml() -> String {
    let seq = |v: f64| {
        let entries: Vec<String> = (0..6).map(|_| format!("{v}")).collect();
        format!("[{}]", entries.join(", "))
    };
    format!(
        "joint_count = 6\n\
         [limits.level1]\nlower = {}\nupper = {}\n\
         [limits.level2]\nlower = {}\nupper = {}\n\
         [limits.level3]\nlower = {}\nupper = {}\n",
        seq(-0.2),
        seq(0.2),
        seq(-0.1),
        seq(0.1),
        seq(-0.05),
        seq(0.05),
    )
}

#[derive(Default)]
struct RecordingSink(Vec<u8>);

impl ScalingSink for &mut RecordingSink {
    fn publish(&mut self, scaling: ScalingFactor) {
        self.0.push(scaling.get());
    }
}

fn replay_scalings(config_toml: &str, replay_text: &str) -> Vec<u8> {
    let config = load_config_from_str(config_toml).expect("config must validate");
    let source = ReplaySource::parse(replay_text, config.joint_count).expect("replay must parse");
    let mut sink = RecordingSink::default();
    let mut runner = CycleRunner::new(&config, source, &mut sink);
    while runner.tick() != Poll::Exhausted {}
    sink.0
}

// ─── Scenario A: two joints, level 1 ────────────────────────────────

#[test]
fn scenario_a_joint_in_band1_publishes_two() {
    // joint0 = 0.0 strictly inside band 1 only; joint1 = 5.0 in no
    // band. Overall level 1, published scaling 2.
    let published = replay_scalings(TWO_JOINT_TOML, "0.0, 5.0\n");
    assert_eq!(published, vec![2]);
}

// ─── Scenario B: any joint in band 3 dominates ──────────────────────

#[test]
fn scenario_b_single_band3_joint_publishes_four() {
    let toml = six_joint_toml();
    for i in 0..6 {
        let mut row: Vec<String> = vec!["5.0".into(); 6];
        row[i] = "0.01".into(); // strictly inside band 3
        let published = replay_scalings(&toml, &format!("{}\n", row.join(", ")));
        assert_eq!(published, vec![4], "joint {i} in band 3 must publish 4");
    }
}

// ─── Scenario C: one short sequence fails validation ────────────────

#[test]
fn scenario_c_short_band2_lower_rejected() {
    let toml = r#"
joint_count = 3

[limits.level1]
lower = [-0.2, -0.2, -0.2]
upper = [0.2, 0.2, 0.2]

[limits.level2]
lower = [-0.1, -0.1]
upper = [0.1, 0.1, 0.1]

[limits.level3]
lower = [-0.05, -0.05, -0.05]
upper = [0.05, 0.05, 0.05]
"#;
    let err = load_config_from_str(toml).unwrap_err();
    match err {
        ConfigError::LimitSizes(ms) => {
            assert_eq!(ms.len(), 1);
            assert_eq!(ms[0].level, 2);
            assert_eq!(ms[0].actual, 2);
            assert_eq!(ms[0].expected, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ─── Scenario D: scaling retained across empty cycles ───────────────

#[test]
fn scenario_d_scaling_retained_for_five_empty_cycles() {
    let toml = six_joint_toml();
    // One sample at level 2 (0.07 inside band 2, outside band 3),
    // then 5 cycles with no new sample.
    let replay = "0.07, 5.0, 5.0, 5.0, 5.0, 5.0\n\n\n\n\n\n";
    let published = replay_scalings(&toml, replay);
    assert_eq!(published, vec![3, 3, 3, 3, 3, 3]);
}

// ─── Startup output before any sample ───────────────────────────────

#[test]
fn startup_scaling_is_one_until_first_sample() {
    let published = replay_scalings(TWO_JOINT_TOML, "\n\n0.0, 5.0\n");
    assert_eq!(published, vec![1, 1, 2]);
}

// ─── Boundary policy end to end ─────────────────────────────────────

#[test]
fn boundary_equal_positions_stay_outside_band() {
    // Exactly on band-1 edges: level 0, scaling 1.
    let published = replay_scalings(TWO_JOINT_TOML, "0.2, -0.2\n");
    assert_eq!(published, vec![1]);
}

// ─── Config file loading from disk ──────────────────────────────────

#[test]
fn load_config_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TWO_JOINT_TOML.as_bytes()).unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.joint_count, 2);
    assert_eq!(config.cycle_time_us, 1000);
}

#[test]
fn missing_config_file_is_io_error() {
    let err = load_config(std::path::Path::new("/nonexistent/detector.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

// ─── Replay file loading from disk ──────────────────────────────────

#[test]
fn replay_from_disk_drives_full_run() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"# warmup\n0.35, 5.0\n\n0.55, 5.0\n5.0, 5.0\n")
        .unwrap();

    let config = load_config_from_str(TWO_JOINT_TOML).unwrap();
    let source = ReplaySource::load(file.path(), config.joint_count).unwrap();
    assert_eq!(source.len(), 4);

    let mut sink = RecordingSink::default();
    let mut runner = CycleRunner::new(&config, source, &mut sink);
    runner.run();

    assert_eq!(runner.stats().cycle_count, 4);
    assert_eq!(runner.stats().sample_count, 3);
    // band 2 → 3, held → 3, band 3 → 4, clear → 1.
    assert_eq!(sink.0, vec![3, 3, 4, 1]);
}

#[test]
fn replay_row_width_checked_against_config() {
    let config = load_config_from_str(TWO_JOINT_TOML).unwrap();
    let err = ReplaySource::parse("0.0, 1.0, 2.0\n", config.joint_count).unwrap_err();
    assert!(err.to_string().contains("should be: 2"));
}
