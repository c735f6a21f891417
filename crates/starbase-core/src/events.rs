//! Events emitted by the universe for UI and audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::ObjectType;

/// Something noteworthy that happened during a tick.
///
/// Object ids are the registry handle bits, as in `ObjectView::id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UniverseEvent {
    /// An object joined the live set.
    ObjectAdded { id: u64, kind: ObjectType },
    /// An object was removed and released.
    ObjectRemoved { id: u64, kind: ObjectType },
    /// A turret sent a missile off its rail.
    MissileLaunched { turret: u64, missile: u64, target: u64 },
    /// An enemy ship fired a bullet.
    ShotFired { ship: u64 },
    /// A structure or ship lost all its hit points.
    ObjectDestroyed { id: u64, kind: ObjectType },
    /// An asteroid was mined out.
    AsteroidDepleted { id: u64 },
}
