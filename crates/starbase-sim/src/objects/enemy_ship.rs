//! Enemy ship: picks a structure, makes an attack run, peels off, repeats.

use glam::Vec2;
use hecs::Entity;

use starbase_core::constants::BULLET_SPEED_FACTOR;
use starbase_core::enums::ShipTask;
use starbase_core::events::UniverseEvent;
use starbase_threat_ai::fsm::{self, ShipContext};
use starbase_threat_ai::targeting::select_target;

use crate::bus::SubscriptionId;
use crate::objects::{object_id, Blueprint, Reaction};
use crate::universe::Universe;

#[derive(Debug, Clone)]
pub struct EnemyShip {
    subscription: SubscriptionId,
    task: ShipTask,
    target: Option<Entity>,
    waypoint: Vec2,
    time_since_last_shot: f32,
}

impl EnemyShip {
    pub(crate) fn new(subscription: SubscriptionId) -> Self {
        Self {
            subscription,
            task: ShipTask::Nothing,
            target: None,
            waypoint: Vec2::ZERO,
            time_since_last_shot: 0.0,
        }
    }

    pub fn task(&self) -> ShipTask {
        self.task
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn waypoint(&self) -> Vec2 {
        self.waypoint
    }

    pub(crate) fn tick(&mut self, me: Entity, universe: &mut Universe, adjustment: f32) {
        let Some(body) = universe.body(me) else {
            return;
        };

        // Stay in Nothing and retry next tick when there is nothing to attack
        if self.task == ShipTask::Nothing && !self.acquire_target(body.position, universe) {
            return;
        }

        let update = fsm::evaluate(&ShipContext {
            task: self.task,
            position: body.position,
            heading: body.heading,
            waypoint: self.waypoint,
            time_since_last_shot: self.time_since_last_shot,
            adjustment,
        });

        universe.set_heading(me, update.heading);
        universe.move_object(me, update.position);
        self.time_since_last_shot = update.time_since_last_shot;

        if update.task_changed {
            log::trace!("ship {me:?}: {:?} -> {:?}", self.task, update.task);
        }
        self.task = update.task;
        if self.task == ShipTask::Nothing {
            self.target = None;
        }

        if update.fire {
            universe.add_object(Blueprint::Bullet {
                position: update.position,
                heading: update.heading,
                speed: update.speed * BULLET_SPEED_FACTOR,
            });
            universe.emit(UniverseEvent::ShotFired { ship: object_id(me) });
        }
    }

    /// Pick the highest-priority structure and head for where it is now.
    fn acquire_target(&mut self, position: Vec2, universe: &Universe) -> bool {
        let target = select_target(|kind| {
            universe.find_closest_object_of_type(position, kind, f32::MAX)
        });
        let Some((target, waypoint)) = target.and_then(|t| universe.position(t).map(|p| (t, p)))
        else {
            return false;
        };

        log::trace!("ship targeting {target:?} at {waypoint}");
        self.target = Some(target);
        self.waypoint = waypoint;
        self.task = ShipTask::Travel;
        true
    }

    pub(crate) fn on_object_removed(&mut self, removed: Entity) -> Option<Reaction> {
        if self.target == Some(removed) {
            self.target = None;
            self.task = ShipTask::Nothing;
        }
        None
    }

    pub(crate) fn teardown(self, universe: &mut Universe) {
        universe.bus_mut().unsubscribe(self.subscription);
    }
}
