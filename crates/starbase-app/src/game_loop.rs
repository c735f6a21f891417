//! Game loop: builds the outpost, sends raids at it and steps the universe.
//!
//! There is no renderer here: the loop runs a fixed number of frames and
//! hands back the final snapshot. With `Pacing::RealTime` each frame sleeps
//! to the nominal frame rate and the measured frame time feeds the
//! universe's frame adjustment.

use std::time::{Duration, Instant};

use starbase_core::constants::NOMINAL_FRAME_RATE;
use starbase_core::enums::ObjectType;
use starbase_core::state::UniverseSnapshot;
use starbase_core::types::frame_adjustment;
use starbase_sim::config::SimConfig;
use starbase_sim::world_setup;
use starbase_sim::Universe;

/// Frames between raids.
pub const RAID_INTERVAL: u64 = 600;

/// Distance from the origin at which raiders appear.
pub const RAID_RADIUS: f32 = 2500.0;

/// Ships in the first raid; each later raid brings one more.
pub const FIRST_RAID_SIZE: usize = 2;

/// Nominal duration of one frame.
const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / NOMINAL_FRAME_RATE as u64);

/// How frames are timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    /// Every frame is exactly nominal. Deterministic for a given seed.
    #[default]
    Fixed,
    /// Sleep to the nominal rate and adjust by the measured frame time.
    RealTime,
}

/// Run `frames` frames of a fresh session and return the final snapshot.
pub fn run_headless(config: SimConfig, frames: u64, pacing: Pacing) -> UniverseSnapshot {
    let mut universe = Universe::new(config);
    world_setup::setup_outpost(&mut universe);

    let mut raids = 0;
    let mut last_frame = Instant::now();
    for frame in 0..frames {
        // 1. Send the next raid on schedule
        if frame % RAID_INTERVAL == 0 {
            let ships = world_setup::spawn_raid(&mut universe, FIRST_RAID_SIZE + raids, RAID_RADIUS);
            raids += 1;
            log::info!("frame {frame}: raid {raids} with {} ships", ships.len());
        }

        // 2. Step the universe
        let adjustment = match pacing {
            Pacing::Fixed => 1.0,
            Pacing::RealTime => {
                let elapsed = last_frame.elapsed();
                last_frame = Instant::now();
                frame_adjustment(elapsed.as_secs_f32() * 1000.0).max(f32::EPSILON)
            }
        };
        universe.tick(adjustment);

        // 3. Drain events so the log does not grow without bound
        for event in universe.take_events() {
            log::trace!("{event:?}");
        }

        // 4. Hold the frame rate
        if pacing == Pacing::RealTime {
            let spent = last_frame.elapsed();
            if spent < FRAME_DURATION {
                std::thread::sleep(FRAME_DURATION - spent);
            }
        }
    }

    let snapshot = universe.snapshot();
    log::info!(
        "session over after {} frames: {} objects, {} enemy ships, power {}, minerals {}",
        snapshot.time.tick,
        snapshot.objects.len(),
        universe.count_of(ObjectType::EnemyShip),
        snapshot.power,
        snapshot.minerals
    );
    snapshot
}
