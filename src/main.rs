//! `manual-pose` command line entry point.
//!
//! Replays a scripted flight through the manual pose controller and logs the
//! pose reached after every frame.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use manual_pose::{init_logging, replay, ControllerSettings, FlightScript};

/// Fly a scripted sequence of axis inputs and log the resulting poses
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON flight script to replay
    #[arg(long)]
    script: PathBuf,

    /// JSON controller settings
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Override the acceleration from the settings (0 = instant motion)
    #[arg(long)]
    acceleration: Option<f32>,
}

fn load_settings(args: &Args) -> Result<ControllerSettings> {
    let mut settings = match &args.settings {
        Some(path) => ControllerSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => ControllerSettings::default(),
    };
    if let Some(acceleration) = args.acceleration {
        settings.acceleration = acceleration;
        settings
            .validate()
            .context("applying --acceleration override")?;
    }
    Ok(settings)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = load_settings(&args)?;
    let script = FlightScript::load(&args.script)
        .with_context(|| format!("loading script from {}", args.script.display()))?;

    info!(
        "replaying {} frames with {settings:?}",
        script.frames.len()
    );
    let poses = replay(&script, settings).context("replaying script")?;
    for (index, pose) in poses.iter().enumerate() {
        info!(
            "frame {index}: position {:?} rotation {:?}",
            pose.position, pose.rotation
        );
    }
    if let Some(last) = poses.last() {
        info!("final pose {last:?}");
    }
    Ok(())
}
