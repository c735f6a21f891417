//! Object components and per-kind behaviors.
//!
//! Every object carries a `Body` and a `Behavior`; destructible objects
//! also carry a `Hull`. Behaviors hold handles to other objects, never
//! references, and resolve them through the `Universe` each time.

pub mod asteroid;
pub mod bullet;
pub mod enemy_ship;
pub mod miner;
pub mod missile;
pub mod structure;
pub mod turret;

use glam::Vec2;
use hecs::Entity;

use starbase_core::enums::ObjectType;
use starbase_core::profiles::half_extent;
use starbase_core::state::AgentView;
use starbase_core::types::Rect;

use crate::universe::Universe;

pub use asteroid::Asteroid;
pub use bullet::Bullet;
pub use enemy_ship::EnemyShip;
pub use miner::Miner;
pub use missile::Missile;
pub use turret::Turret;

/// Stable external id for an object handle.
pub fn object_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

/// Spatial state shared by every object. `kind` never changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub kind: ObjectType,
    pub position: Vec2,
    /// Degrees in `[0, 360)`.
    pub heading: f32,
    pub half_extent: Vec2,
}

impl Body {
    pub fn new(kind: ObjectType, position: Vec2, heading: f32) -> Self {
        Self {
            kind,
            position,
            heading,
            half_extent: half_extent(kind),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position, self.half_extent)
    }
}

/// Hit points of a structure or ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hull {
    pub hit_points: i32,
}

impl Hull {
    /// Apply damage. Returns true only on the hit that takes the hull below zero.
    pub fn take_damage(&mut self, damage: i32) -> bool {
        let was_intact = self.hit_points >= 0;
        self.hit_points -= damage;
        was_intact && self.hit_points < 0
    }
}

/// Recipe for a new object, consumed by `Universe::add_object`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Blueprint {
    Asteroid { position: Vec2, minerals: i32 },
    CommandCenter { position: Vec2 },
    PowerRelay { position: Vec2 },
    Miner { position: Vec2 },
    Turret { position: Vec2 },
    EnemyShip { position: Vec2, heading: f32 },
    Bullet { position: Vec2, heading: f32, speed: f32 },
    Missile { position: Vec2, heading: f32 },
}

impl Blueprint {
    /// Blueprint for a structure kind, or `None` if `kind` is not a structure.
    pub fn structure(kind: ObjectType, position: Vec2) -> Option<Self> {
        match kind {
            ObjectType::CommandCenter => Some(Self::CommandCenter { position }),
            ObjectType::PowerRelay => Some(Self::PowerRelay { position }),
            ObjectType::Miner => Some(Self::Miner { position }),
            ObjectType::Turret => Some(Self::Turret { position }),
            _ => None,
        }
    }

    pub fn kind(&self) -> ObjectType {
        match self {
            Self::Asteroid { .. } => ObjectType::Asteroid,
            Self::CommandCenter { .. } => ObjectType::CommandCenter,
            Self::PowerRelay { .. } => ObjectType::PowerRelay,
            Self::Miner { .. } => ObjectType::Miner,
            Self::Turret { .. } => ObjectType::Turret,
            Self::EnemyShip { .. } => ObjectType::EnemyShip,
            Self::Bullet { .. } => ObjectType::Bullet,
            Self::Missile { .. } => ObjectType::Missile,
        }
    }

    pub fn position(&self) -> Vec2 {
        match *self {
            Self::Asteroid { position, .. }
            | Self::CommandCenter { position }
            | Self::PowerRelay { position }
            | Self::Miner { position }
            | Self::Turret { position }
            | Self::EnemyShip { position, .. }
            | Self::Bullet { position, .. }
            | Self::Missile { position, .. } => position,
        }
    }

    pub fn heading(&self) -> f32 {
        match *self {
            Self::EnemyShip { heading, .. }
            | Self::Bullet { heading, .. }
            | Self::Missile { heading, .. } => heading,
            _ => 0.0,
        }
    }
}

/// Deferred effect of a removal notification.
///
/// Callbacks return one of these instead of touching the registry; the
/// universe applies it once the subscriber's state is no longer borrowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Remove the subscriber itself.
    SelfDestruct,
    /// Put a fresh missile on the given turret rail slot.
    ReplaceMissile { slot: usize },
    /// Recompute the miner's asteroid list without the removed object.
    RescanAsteroids { excluding: Entity },
}

/// Per-kind behavior component.
///
/// `Inert` is the placeholder left in the world while a behavior is taken
/// out to tick.
#[derive(Debug, Default)]
pub enum Behavior {
    #[default]
    Inert,
    Asteroid(Asteroid),
    /// Command centers and power relays: power bookkeeping only.
    Structure,
    Miner(Miner),
    Turret(Turret),
    EnemyShip(EnemyShip),
    Bullet(Bullet),
    Missile(Missile),
}

impl Behavior {
    /// Advance one frame.
    pub fn tick(&mut self, me: Entity, universe: &mut Universe, adjustment: f32) {
        match self {
            Behavior::Inert => {}
            Behavior::Asteroid(asteroid) => asteroid.tick(me, universe, adjustment),
            Behavior::Structure => structure::tick(me, universe),
            Behavior::Miner(miner) => miner.tick(me, universe, adjustment),
            Behavior::Turret(turret) => turret.tick(me, universe, adjustment),
            Behavior::EnemyShip(ship) => ship.tick(me, universe, adjustment),
            Behavior::Bullet(bullet) => bullet.tick(me, universe),
            Behavior::Missile(missile) => missile.tick(me, universe, adjustment),
        }
    }

    /// Removal callback for bus subscribers.
    pub fn on_object_removed(&mut self, removed: Entity) -> Option<Reaction> {
        match self {
            Behavior::Miner(miner) => miner.on_object_removed(removed),
            Behavior::Turret(turret) => turret.on_object_removed(removed),
            Behavior::EnemyShip(ship) => ship.on_object_removed(removed),
            Behavior::Missile(missile) => missile.on_object_removed(removed),
            _ => None,
        }
    }

    /// Release hook, run after the object has left the live list.
    pub fn teardown(self, universe: &mut Universe) {
        match self {
            Behavior::Miner(miner) => miner.teardown(universe),
            Behavior::Turret(turret) => turret.teardown(universe),
            Behavior::EnemyShip(ship) => ship.teardown(universe),
            Behavior::Missile(missile) => missile.teardown(universe),
            _ => {}
        }
    }

    pub fn agent_view(&self) -> Option<AgentView> {
        match self {
            Behavior::Turret(turret) => Some(AgentView::Turret(turret.task())),
            Behavior::EnemyShip(ship) => Some(AgentView::EnemyShip(ship.task())),
            Behavior::Missile(missile) => Some(AgentView::Missile(missile.task())),
            _ => None,
        }
    }
}
