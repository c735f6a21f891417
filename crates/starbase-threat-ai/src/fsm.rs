//! Enemy ship finite state machine.
//!
//! Pure functions that compute task transitions, steering and firing for
//! one ship per tick. No ECS dependency: operates on plain data.
//!
//! Movement is a fixed step per tick; only the fire timer is scaled by the
//! frame adjustment.

use glam::Vec2;

use starbase_core::constants::*;
use starbase_core::enums::ShipTask;
use starbase_core::steering::{
    advance, angular_difference, direction_between, distance_between, turn_towards,
    wrap_degrees,
};

/// Input to the ship FSM for a single entity.
#[derive(Debug, Clone, Copy)]
pub struct ShipContext {
    pub task: ShipTask,
    pub position: Vec2,
    pub heading: f32,
    /// Where the target was when it was picked.
    pub waypoint: Vec2,
    pub time_since_last_shot: f32,
    pub adjustment: f32,
}

/// Output from the ship FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipUpdate {
    pub task: ShipTask,
    pub position: Vec2,
    pub heading: f32,
    /// Speed used this tick. Bullets fired this tick scale off it.
    pub speed: f32,
    pub time_since_last_shot: f32,
    /// Fire one bullet along the new heading from the new position.
    pub fire: bool,
    pub task_changed: bool,
}

/// Evaluate the FSM for one ship.
///
/// `Nothing` is returned unchanged: choosing a target needs the registry,
/// so the caller resolves it and moves the ship to `Travel` first.
pub fn evaluate(ctx: &ShipContext) -> ShipUpdate {
    match ctx.task {
        ShipTask::Nothing => hold(ctx),
        ShipTask::Travel => evaluate_travel(ctx),
        ShipTask::Attacking => evaluate_attacking(ctx),
        ShipTask::Egress => evaluate_egress(ctx),
    }
}

fn hold(ctx: &ShipContext) -> ShipUpdate {
    ShipUpdate {
        task: ctx.task,
        position: ctx.position,
        heading: ctx.heading,
        speed: 0.0,
        time_since_last_shot: ctx.time_since_last_shot,
        fire: false,
        task_changed: false,
    }
}

fn evaluate_travel(ctx: &ShipContext) -> ShipUpdate {
    let desired = direction_between(ctx.position, ctx.waypoint);
    let heading = turn_towards(ctx.heading, desired, SHIP_TURN_RATE);
    let position = advance(ctx.position, heading, SHIP_TRAVEL_SPEED);

    // Lined up and inside engagement range: open fire and start the run
    if heading == desired && distance_between(position, ctx.waypoint) < SHIP_ENGAGEMENT_RANGE {
        return ShipUpdate {
            task: ShipTask::Attacking,
            position,
            heading,
            speed: SHIP_TRAVEL_SPEED,
            time_since_last_shot: 0.0,
            fire: true,
            task_changed: true,
        };
    }

    ShipUpdate {
        task: ShipTask::Travel,
        position,
        heading,
        speed: SHIP_TRAVEL_SPEED,
        time_since_last_shot: ctx.time_since_last_shot,
        fire: false,
        task_changed: false,
    }
}

fn evaluate_attacking(ctx: &ShipContext) -> ShipUpdate {
    let (fire, time_since_last_shot) = if ctx.time_since_last_shot > SHIP_FIRE_INTERVAL {
        (true, 0.0)
    } else {
        (false, ctx.time_since_last_shot + ctx.adjustment)
    };

    // Attack runs hold heading; the ship overflies the target and peels off
    let position = advance(ctx.position, ctx.heading, SHIP_ATTACK_SPEED);
    let bearing = direction_between(position, ctx.waypoint);
    let drifted = angular_difference(bearing, ctx.heading) > SHIP_TURN_RATE;

    ShipUpdate {
        task: if drifted {
            ShipTask::Egress
        } else {
            ShipTask::Attacking
        },
        position,
        heading: ctx.heading,
        speed: SHIP_ATTACK_SPEED,
        time_since_last_shot,
        fire,
        task_changed: drifted,
    }
}

fn evaluate_egress(ctx: &ShipContext) -> ShipUpdate {
    let heading = wrap_degrees(ctx.heading - SHIP_TURN_RATE * SHIP_EGRESS_TURN_FACTOR);
    let position = advance(ctx.position, heading, SHIP_TRAVEL_SPEED);
    let clear = distance_between(position, ctx.waypoint)
        > SHIP_ENGAGEMENT_RANGE * SHIP_EGRESS_RANGE_FACTOR;

    ShipUpdate {
        task: if clear {
            ShipTask::Nothing
        } else {
            ShipTask::Egress
        },
        position,
        heading,
        speed: SHIP_TRAVEL_SPEED,
        time_since_last_shot: ctx.time_since_last_shot,
        fire: false,
        task_changed: clear,
    }
}
