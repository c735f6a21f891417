//! Homing missile launched from a turret rail.

use hecs::Entity;

use starbase_core::constants::*;
use starbase_core::enums::{MissileTask, ObjectType};
use starbase_core::steering::{advance, direction_between, turn_towards};

use crate::bus::SubscriptionId;
use crate::objects::Reaction;
use crate::universe::Universe;

#[derive(Debug, Clone)]
pub struct Missile {
    subscription: SubscriptionId,
    task: MissileTask,
    target: Option<Entity>,
    time_since_launch: f32,
}

impl Missile {
    pub(crate) fn new(subscription: SubscriptionId) -> Self {
        Self {
            subscription,
            task: MissileTask::Idle,
            target: None,
            time_since_launch: 0.0,
        }
    }

    pub fn task(&self) -> MissileTask {
        self.task
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn is_launched(&self) -> bool {
        self.task.is_launched()
    }

    pub fn time_since_launch(&self) -> f32 {
        self.time_since_launch
    }

    /// Leave the rail toward `target`. Only an idle missile can launch.
    pub(crate) fn launch_at(&mut self, target: Entity) -> bool {
        if self.task != MissileTask::Idle {
            return false;
        }
        self.target = Some(target);
        self.task = MissileTask::Launching;
        self.time_since_launch = 0.0;
        true
    }

    /// Advance the flight clock. Returns true once the budget is spent; the
    /// clock then restarts from zero.
    pub(crate) fn advance_flight_clock(&mut self, adjustment: f32) -> bool {
        if self.time_since_launch > MISSILE_FLIGHT_BUDGET {
            self.time_since_launch = 0.0;
            true
        } else {
            self.time_since_launch += adjustment;
            false
        }
    }

    pub(crate) fn tick(&mut self, me: Entity, universe: &mut Universe, adjustment: f32) {
        match self.task {
            MissileTask::Idle | MissileTask::Exploding => return,
            MissileTask::Launching => self.task = MissileTask::Tracking,
            MissileTask::Tracking => {}
        }

        let Some(target_position) = self.target.and_then(|t| universe.position(t)) else {
            self.self_destruct(me, universe);
            return;
        };
        let Some(body) = universe.body(me) else {
            return;
        };

        let desired = direction_between(body.position, target_position);
        let heading = turn_towards(body.heading, desired, MISSILE_TURN_RATE);
        let position = advance(body.position, heading, MISSILE_SPEED);
        universe.set_heading(me, heading);
        universe.move_object(me, position);

        let mut detonate = false;
        let near_ship = !universe
            .find_objects_in_radius(&[ObjectType::EnemyShip], position, MISSILE_HIT_RADIUS)
            .is_empty();
        if near_ship {
            if let Some(target) = self.target {
                universe.shoot(target, MISSILE_DAMAGE);
            }
            detonate = true;
        }
        if self.advance_flight_clock(adjustment) {
            detonate = true;
        }

        if detonate {
            self.self_destruct(me, universe);
        }
    }

    /// Request our own removal once.
    fn self_destruct(&mut self, me: Entity, universe: &mut Universe) {
        if self.task == MissileTask::Exploding {
            return;
        }
        self.task = MissileTask::Exploding;
        self.target = None;
        universe.remove_object(me);
    }

    pub(crate) fn on_object_removed(&mut self, removed: Entity) -> Option<Reaction> {
        if self.target != Some(removed) || self.task == MissileTask::Exploding {
            return None;
        }
        self.task = MissileTask::Exploding;
        self.target = None;
        Some(Reaction::SelfDestruct)
    }

    pub(crate) fn teardown(self, universe: &mut Universe) {
        universe.bus_mut().unsubscribe(self.subscription);
    }
}
