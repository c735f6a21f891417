//! Universe snapshot: the complete visible state handed to a renderer each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::UniverseEvent;
use crate::types::{Rect, SimTime};

/// Complete visible state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UniverseSnapshot {
    pub time: SimTime,
    /// Power balance accumulated during the last tick.
    pub power: i32,
    /// Mineral stockpile.
    pub minerals: i32,
    /// Live objects in registry order.
    pub objects: Vec<ObjectView>,
    pub links: Vec<LinkView>,
    pub events: Vec<UniverseEvent>,
}

/// One live object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectView {
    pub id: u64,
    pub kind: ObjectType,
    pub position: Vec2,
    /// Degrees, counter-clockwise from +x.
    pub heading: f32,
    pub bounds: Rect,
    pub texture: TextureKey,
    pub hit_points: Option<i32>,
    /// Remaining minerals, asteroids only.
    pub minerals: Option<i32>,
    /// Render-only rotation in degrees per frame, asteroids only.
    pub spin: Option<f32>,
    pub agent: Option<AgentView>,
}

/// Current task of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "agent", content = "task")]
pub enum AgentView {
    Missile(MissileTask),
    Turret(TurretTask),
    EnemyShip(ShipTask),
}

/// A power link between two structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkView {
    pub source: u64,
    pub destination: u64,
}
