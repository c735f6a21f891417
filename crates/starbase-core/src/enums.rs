//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Kind of an object in the universe.
///
/// Declaration order is the registry's sort order: objects of a later kind
/// are ticked after, and picked before, objects of an earlier kind.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ObjectType {
    #[default]
    Asteroid,
    CommandCenter,
    PowerRelay,
    Miner,
    Turret,
    EnemyShip,
    Bullet,
    Missile,
}

/// Structure kinds, in registry order. Bullets collide with these.
pub const STRUCTURE_TYPES: [ObjectType; 4] = [
    ObjectType::CommandCenter,
    ObjectType::PowerRelay,
    ObjectType::Miner,
    ObjectType::Turret,
];

impl ObjectType {
    /// Structures can be placed by the player, carry hit points and join the power grid.
    pub fn is_structure(self) -> bool {
        STRUCTURE_TYPES.contains(&self)
    }

    /// Whether objects of this kind carry hit points.
    pub fn is_destructible(self) -> bool {
        self.is_structure() || self == ObjectType::EnemyShip
    }

    /// Texture used when rendering objects of this kind.
    pub fn texture_key(self) -> TextureKey {
        match self {
            ObjectType::CommandCenter => TextureKey::CommandCenter,
            ObjectType::Asteroid => TextureKey::Asteroid1,
            _ => TextureKey::Unknown,
        }
    }
}

/// Enumerated key into the asset layer's texture table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureKey {
    #[default]
    Unknown,
    CommandCenter,
    /// Rich asteroid.
    Asteroid1,
    /// Partially mined asteroid.
    Asteroid2,
    /// Nearly depleted asteroid.
    Asteroid3,
}

/// Missile flight task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissileTask {
    /// Sitting on a turret rail.
    #[default]
    Idle,
    /// Launched this tick; becomes Tracking on its next update.
    Launching,
    /// Homing on the target.
    Tracking,
    /// Removal requested. Terminal.
    Exploding,
}

impl MissileTask {
    /// A missile has left the rail once it is past the Idle task.
    pub fn is_launched(self) -> bool {
        self != MissileTask::Idle
    }
}

/// Turret engagement task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurretTask {
    /// Sweeping the rail and scanning for ships.
    #[default]
    Idle,
    /// Tracking a target and firing on cadence.
    Attacking,
}

/// Enemy ship task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipTask {
    /// No target; pick one next update.
    #[default]
    Nothing,
    /// Steering toward the target way-point.
    Travel,
    /// Strafing run, firing on cadence.
    Attacking,
    /// Peeling away until far enough to turn back.
    Egress,
}
