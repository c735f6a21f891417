//! Turret: sweeps for enemy ships and fires missiles from a three-slot rail.

use glam::Vec2;
use hecs::Entity;

use starbase_core::constants::*;
use starbase_core::enums::{MissileTask, ObjectType, TurretTask};
use starbase_core::steering::{direction_between, heading_vector, wrap_degrees};

use crate::bus::SubscriptionId;
use crate::objects::{structure, Reaction};
use crate::universe::Universe;

/// Offset of a rail slot from the turret centre, perpendicular to `heading`.
pub fn rail_offset(slot: usize, heading: f32) -> Vec2 {
    heading_vector(heading).perp() * ((slot as f32 - 1.0) * TURRET_RAIL_SPACING)
}

#[derive(Debug, Clone)]
pub struct Turret {
    subscription: SubscriptionId,
    task: TurretTask,
    target: Option<Entity>,
    /// Always full: a removed missile is replaced in its slot.
    missiles: [Entity; TURRET_MISSILE_COUNT],
    time_since_last_shot: f32,
}

impl Turret {
    pub(crate) fn new(
        subscription: SubscriptionId,
        missiles: [Entity; TURRET_MISSILE_COUNT],
    ) -> Self {
        Self {
            subscription,
            task: TurretTask::Idle,
            target: None,
            missiles,
            time_since_last_shot: 0.0,
        }
    }

    pub fn task(&self) -> TurretTask {
        self.task
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn missiles(&self) -> [Entity; TURRET_MISSILE_COUNT] {
        self.missiles
    }

    pub(crate) fn replace_missile(&mut self, slot: usize, missile: Entity) {
        if let Some(entry) = self.missiles.get_mut(slot) {
            *entry = missile;
        }
    }

    pub(crate) fn tick(&mut self, me: Entity, universe: &mut Universe, adjustment: f32) {
        structure::apply_power_delta(ObjectType::Turret, universe);

        let Some(position) = universe.position(me) else {
            return;
        };

        if self.task == TurretTask::Idle {
            let heading = universe.heading(me).unwrap_or_default();
            self.turn_rail(me, universe, heading + TURRET_SCAN_RATE * adjustment);

            self.target = universe.find_closest_object_of_type(
                position,
                ObjectType::EnemyShip,
                TURRET_ACQUISITION_RANGE,
            );
            if let Some(target) = self.target {
                log::trace!("turret {me:?} acquired {target:?}");
                self.task = TurretTask::Attacking;
            }
        }

        if self.task == TurretTask::Attacking {
            let Some(target_position) = self.target.and_then(|t| universe.position(t)) else {
                self.stand_down();
                return;
            };
            self.turn_rail(me, universe, direction_between(position, target_position));

            if self.time_since_last_shot > TURRET_FIRE_INTERVAL {
                self.fire(me, universe);
                self.time_since_last_shot = 0.0;
            } else {
                self.time_since_last_shot += adjustment;
            }
        }
    }

    fn turn_rail(&self, me: Entity, universe: &mut Universe, heading: f32) {
        universe.set_heading(me, wrap_degrees(heading));
        universe.seat_missiles(me, &self.missiles);
    }

    /// Launch the first missile still on the rail, if any.
    fn fire(&self, me: Entity, universe: &mut Universe) {
        let Some(target) = self.target else {
            return;
        };
        let ready = self
            .missiles
            .iter()
            .copied()
            .find(|&missile| universe.missile_task(missile) == Some(MissileTask::Idle));
        if let Some(missile) = ready {
            universe.launch_missile(me, missile, target);
        }
    }

    fn stand_down(&mut self) {
        self.target = None;
        self.task = TurretTask::Idle;
    }

    pub(crate) fn on_object_removed(&mut self, removed: Entity) -> Option<Reaction> {
        if let Some(slot) = self.missiles.iter().position(|&m| m == removed) {
            return Some(Reaction::ReplaceMissile { slot });
        }
        if self.target == Some(removed) {
            self.stand_down();
        }
        None
    }

    /// Cancel the subscription first so removing our own missiles does not
    /// trigger replacements.
    pub(crate) fn teardown(self, universe: &mut Universe) {
        universe.bus_mut().unsubscribe(self.subscription);
        for missile in self.missiles {
            if universe
                .missile_task(missile)
                .is_some_and(|task| !task.is_launched())
            {
                universe.remove_object(missile);
            }
        }
    }
}
