//! # SGD Detector
//!
//! Singularity proximity detector for a joint-space motion controller.
//!
//! Loads and validates the TOML limit configuration, then either stops
//! after the check (`--check`) or drives the evaluation cycle from a
//! replay file of joint positions, publishing the scaling factor for
//! every cycle through the log sink. Live transport to a position
//! producer and a velocity scaler is the host controller's concern;
//! it calls [`sgd_detector::cycle::CycleRunner::tick`] directly.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use sgd_common::level::ScalingFactor;
use sgd_detector::config::load_config;
use sgd_detector::cycle::{CycleRunner, ScalingSink};
use sgd_detector::replay::ReplaySource;

/// SGD Detector — joint-space singularity proximity classification
#[derive(Parser, Debug)]
#[command(name = "sgd_detector")]
#[command(version)]
#[command(about = "Classifies proximity to kinematic singularities from joint positions")]
struct Args {
    /// Path to the detector configuration TOML.
    #[arg(default_value = "config/detector.toml")]
    config: PathBuf,

    /// Replay file of joint positions (CSV rows, blank row = no sample).
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Validate the configuration and exit.
    #[arg(long)]
    check: bool,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    setup_tracing(&args);

    info!("SGD Detector v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args) {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("SGD Detector shutdown complete");
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    // Validation failures are already logged at the config boundary;
    // the detector refuses to enter operation on any of them.
    let config = load_config(&args.config)?;
    info!(
        "Config OK: joints={}, cycle_time={}µs",
        config.joint_count, config.cycle_time_us
    );

    if args.check {
        return Ok(());
    }

    let Some(ref replay_path) = args.replay else {
        info!("No --replay input; configuration check only");
        return Ok(());
    };

    let source = ReplaySource::load(replay_path, config.joint_count)?;
    info!(
        "Replaying {} cycles from {}",
        source.len(),
        replay_path.display()
    );

    let mut runner = CycleRunner::new(&config, source, LogSink);
    runner.run();

    let stats = runner.stats();
    info!(
        "Replay done: cycles={}, samples={}, avg={}ns, max={}ns, final_scaling={}",
        stats.cycle_count,
        stats.sample_count,
        stats.avg_cycle_ns(),
        stats.max_cycle_ns,
        runner.scaling(),
    );

    Ok(())
}

/// Publishes each scaling value on the log stream.
struct LogSink;

impl ScalingSink for LogSink {
    fn publish(&mut self, scaling: ScalingFactor) {
        info!(scaling = scaling.get(), "singularity scaling");
    }
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
