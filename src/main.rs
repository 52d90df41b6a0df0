//! Tile Drift entry point
//!
//! Parses the command line, sets up logging and hands over to the platform
//! loop.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tile_drift::{SceneKind, Settings, platform};

fn parse_scene(s: &str) -> Result<SceneKind, String> {
    SceneKind::from_str(s).ok_or_else(|| format!("unknown scene '{s}' (expected tiles or keyboard)"))
}

#[derive(Parser)]
#[command(name = "tile-drift", about = "Rotating tiles and keyboard movement demos")]
struct Cli {
    /// Which demo to run: tiles or keyboard
    #[arg(long, value_parser = parse_scene)]
    scene: Option<SceneKind>,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Asset root directory
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path).context("failed to load settings")?,
        None => Settings::default(),
    };
    if let Some(scene) = cli.scene {
        settings.scene = scene;
    }
    if let Some(root) = cli.assets {
        settings.asset_root = root;
    }

    log::info!(
        "Starting {} scene (assets in {})",
        settings.scene.as_str(),
        settings.asset_root.display()
    );

    if let Err(e) = platform::run(settings) {
        log::error!("{e:#}");
        return Err(e);
    }
    Ok(())
}
