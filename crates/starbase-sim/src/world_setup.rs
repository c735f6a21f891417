//! Spawn helpers for setting up the universe.
//!
//! Builds the starting outpost and places raiding enemy ships.

use glam::Vec2;
use hecs::Entity;
use rand::Rng;

use starbase_core::constants::ASTEROID_DEFAULT_MINERALS;
use starbase_core::steering::{direction_between, heading_vector};

use crate::objects::Blueprint;
use crate::universe::Universe;

/// Relay positions of the starting grid.
pub const STARTING_RELAYS: [Vec2; 2] = [Vec2::new(500.0, 250.0), Vec2::new(-450.0, 50.0)];

/// Centre of the starting asteroid field.
pub const ASTEROID_FIELD_CENTER: Vec2 = Vec2::new(700.0, -500.0);

/// Number of asteroids in the starting field.
pub const ASTEROID_FIELD_SIZE: usize = 8;

/// Handles to the starting outpost.
#[derive(Debug, Clone)]
pub struct Outpost {
    pub command_center: Entity,
    pub relays: Vec<Entity>,
    pub miner: Entity,
    pub turret: Entity,
    pub asteroids: Vec<Entity>,
}

/// Set up the starting outpost: command center at the origin, two relays,
/// an asteroid field with a miner beside it, and one turret.
pub fn setup_outpost(universe: &mut Universe) -> Outpost {
    let command_center = universe.add_object(Blueprint::CommandCenter {
        position: Vec2::ZERO,
    });
    let relays = STARTING_RELAYS
        .iter()
        .map(|&position| universe.add_object(Blueprint::PowerRelay { position }))
        .collect();

    // Asteroids first so the miner finds them when it is built
    let asteroids = spawn_asteroid_field(universe, ASTEROID_FIELD_CENTER, ASTEROID_FIELD_SIZE);
    let miner = universe.add_object(Blueprint::Miner {
        position: Vec2::new(600.0, -200.0),
    });
    let turret = universe.add_object(Blueprint::Turret {
        position: Vec2::new(-300.0, 300.0),
    });

    log::info!(
        "outpost ready: {} objects, {} links",
        universe.len(),
        universe.links().len()
    );

    Outpost {
        command_center,
        relays,
        miner,
        turret,
        asteroids,
    }
}

/// Scatter `count` asteroids around `center` with random sizes.
pub fn spawn_asteroid_field(universe: &mut Universe, center: Vec2, count: usize) -> Vec<Entity> {
    (0..count)
        .map(|_| {
            let rng = universe.rng_mut();
            let bearing: f32 = rng.gen_range(0.0..360.0);
            let distance: f32 = rng.gen_range(100.0..350.0);
            let minerals: i32 =
                rng.gen_range(ASTEROID_DEFAULT_MINERALS - 400..=ASTEROID_DEFAULT_MINERALS + 400);
            universe.add_object(Blueprint::Asteroid {
                position: center + heading_vector(bearing) * distance,
                minerals,
            })
        })
        .collect()
}

/// Place `count` enemy ships evenly around a ring of `radius` about the
/// origin, each facing inward with a little jitter.
pub fn spawn_raid(universe: &mut Universe, count: usize, radius: f32) -> Vec<Entity> {
    let spacing = 360.0 / count.max(1) as f32;
    (0..count)
        .map(|i| {
            let jitter: f32 = universe.rng_mut().gen_range(-10.0..10.0);
            let position = heading_vector(i as f32 * spacing + jitter) * radius;
            universe.add_object(Blueprint::EnemyShip {
                position,
                heading: direction_between(position, Vec2::ZERO),
            })
        })
        .collect()
}
