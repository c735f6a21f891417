//! Per-kind tuning tables: structure costs and object extents.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{ObjectType, TextureKey};

/// Fixed economic data for a structure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureProfile {
    pub hit_points: i32,
    /// Change to the power balance every tick. Positive generates, negative consumes.
    pub power_delta: i32,
    /// Minerals charged when the structure is placed.
    pub mineral_cost: i32,
}

/// Profile for a structure kind, or `None` for non-structures.
pub fn structure_profile(kind: ObjectType) -> Option<StructureProfile> {
    let profile = match kind {
        ObjectType::CommandCenter => StructureProfile {
            hit_points: 5000,
            power_delta: COMMAND_CENTER_POWER_OUTPUT,
            mineral_cost: 0,
        },
        ObjectType::PowerRelay => StructureProfile {
            hit_points: 500,
            power_delta: -500,
            mineral_cost: 1000,
        },
        ObjectType::Miner => StructureProfile {
            hit_points: 1500,
            power_delta: -750,
            mineral_cost: 1500,
        },
        ObjectType::Turret => StructureProfile {
            hit_points: 500,
            power_delta: -750,
            mineral_cost: 1000,
        },
        _ => return None,
    };
    Some(profile)
}

/// Starting hit points for destructible kinds.
pub fn initial_hit_points(kind: ObjectType) -> Option<i32> {
    if !kind.is_destructible() {
        return None;
    }
    match kind {
        ObjectType::EnemyShip => Some(SHIP_HIT_POINTS),
        other => structure_profile(other).map(|p| p.hit_points),
    }
}

/// Half extent of the bounding rectangle for a kind.
pub fn half_extent(kind: ObjectType) -> Vec2 {
    let half = match kind {
        ObjectType::Asteroid => ASTEROID_HALF_EXTENT,
        ObjectType::CommandCenter => COMMAND_CENTER_HALF_EXTENT,
        ObjectType::PowerRelay => POWER_RELAY_HALF_EXTENT,
        ObjectType::Miner => MINER_HALF_EXTENT,
        ObjectType::Turret => TURRET_HALF_EXTENT,
        ObjectType::EnemyShip => SHIP_HALF_EXTENT,
        ObjectType::Bullet => BULLET_HALF_EXTENT,
        ObjectType::Missile => MISSILE_HALF_EXTENT,
    };
    Vec2::splat(half)
}

/// Texture for an asteroid with the given mineral count.
pub fn asteroid_texture(minerals: i32) -> TextureKey {
    if minerals < ASTEROID_DEPLETED_THRESHOLD {
        TextureKey::Asteroid3
    } else if minerals < ASTEROID_PARTIAL_THRESHOLD {
        TextureKey::Asteroid2
    } else {
        TextureKey::Asteroid1
    }
}
