use std::error::Error;

use starbase_app::game_loop::{self, Pacing};
use starbase_sim::config::SimConfig;

/// Frames run when none are given: one minute at the nominal rate.
const DEFAULT_FRAMES: u64 = 3600;

/// `starbase-app [config.toml] [frames] [--realtime]`
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut pacing = Pacing::Fixed;
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--realtime" {
            pacing = Pacing::RealTime;
        } else {
            positional.push(arg);
        }
    }

    let config = match positional.first() {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    let frames = match positional.get(1) {
        Some(frames) => frames.parse()?,
        None => DEFAULT_FRAMES,
    };

    log::info!("starting session: seed {}, {frames} frames", config.seed);
    let snapshot = game_loop::run_headless(config, frames, pacing);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
