//! Enemy bullet: flies straight, damages the first structure it touches.

use glam::Vec2;
use hecs::Entity;

use starbase_core::constants::{BULLET_DAMAGE, BULLET_HIT_RADIUS, BULLET_RANGE};
use starbase_core::enums::STRUCTURE_TYPES;
use starbase_core::steering::{advance, distance_between};

use crate::universe::Universe;

#[derive(Debug, Clone)]
pub struct Bullet {
    origin: Vec2,
    speed: f32,
    spent: bool,
}

impl Bullet {
    pub(crate) fn new(origin: Vec2, speed: f32) -> Self {
        Self {
            origin,
            speed,
            spent: false,
        }
    }

    pub(crate) fn tick(&mut self, me: Entity, universe: &mut Universe) {
        if self.spent {
            return;
        }
        let Some(body) = universe.body(me) else {
            return;
        };

        let position = advance(body.position, body.heading, self.speed);
        universe.move_object(me, position);

        let hit = universe
            .find_objects_in_radius(&STRUCTURE_TYPES, position, BULLET_HIT_RADIUS)
            .first()
            .copied();
        if let Some(structure) = hit {
            universe.shoot(structure, BULLET_DAMAGE);
            self.spend(me, universe);
        } else if distance_between(position, self.origin) > BULLET_RANGE {
            self.spend(me, universe);
        }
    }

    fn spend(&mut self, me: Entity, universe: &mut Universe) {
        self.spent = true;
        universe.remove_object(me);
    }
}
