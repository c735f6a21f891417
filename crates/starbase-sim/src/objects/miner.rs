//! Miner: extracts minerals from nearby asteroids on a fixed cadence.

use hecs::Entity;

use starbase_core::constants::{MINER_INTERVAL, MINER_YIELD};
use starbase_core::enums::ObjectType;

use crate::bus::SubscriptionId;
use crate::objects::{structure, Reaction};
use crate::universe::Universe;

#[derive(Debug, Clone)]
pub struct Miner {
    subscription: SubscriptionId,
    /// Asteroids in range, recomputed on every move and every removal.
    asteroids: Vec<Entity>,
    time_since_last_mined: f32,
}

impl Miner {
    pub(crate) fn new(subscription: SubscriptionId, asteroids: Vec<Entity>) -> Self {
        Self {
            subscription,
            asteroids,
            time_since_last_mined: 0.0,
        }
    }

    pub fn asteroids(&self) -> &[Entity] {
        &self.asteroids
    }

    pub(crate) fn set_asteroids(&mut self, asteroids: Vec<Entity>) {
        self.asteroids = asteroids;
    }

    pub(crate) fn tick(&mut self, _me: Entity, universe: &mut Universe, adjustment: f32) {
        structure::apply_power_delta(ObjectType::Miner, universe);

        if self.time_since_last_mined > MINER_INTERVAL {
            for &asteroid in &self.asteroids {
                let mined = universe.mine_asteroid(asteroid, MINER_YIELD);
                universe.adjust_minerals(mined);
            }
            self.time_since_last_mined = 0.0;
        } else {
            self.time_since_last_mined += adjustment;
        }
    }

    pub(crate) fn on_object_removed(&mut self, removed: Entity) -> Option<Reaction> {
        Some(Reaction::RescanAsteroids { excluding: removed })
    }

    pub(crate) fn teardown(self, universe: &mut Universe) {
        universe.bus_mut().unsubscribe(self.subscription);
    }
}
