//! Power grid links between structures.
//!
//! Relays link to every relay in range; other structures link to their
//! nearest relay. Links are undirected and pruned the moment either end
//! is removed.

use glam::Vec2;
use hecs::Entity;

use starbase_core::constants::{RELAY_LINK_RANGE, STRUCTURE_LINK_RANGE};
use starbase_core::enums::ObjectType;

/// An undirected edge between two structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub source: Entity,
    pub destination: Entity,
}

impl Link {
    pub fn touches(&self, entity: Entity) -> bool {
        self.source == entity || self.destination == entity
    }

    /// Whether this link joins `a` and `b`, in either direction.
    pub fn connects(&self, a: Entity, b: Entity) -> bool {
        (self.source == a && self.destination == b) || (self.source == b && self.destination == a)
    }
}

/// The set of live power links.
#[derive(Debug, Default)]
pub struct LinkGraph {
    links: Vec<Link>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link. Self-links and duplicates of an existing pair are rejected.
    pub fn add(&mut self, source: Entity, destination: Entity) -> bool {
        if source == destination || self.contains(source, destination) {
            return false;
        }
        self.links.push(Link {
            source,
            destination,
        });
        true
    }

    pub fn contains(&self, a: Entity, b: Entity) -> bool {
        self.links.iter().any(|link| link.connects(a, b))
    }

    /// Drop every link touching `entity`. Returns how many were removed.
    pub fn prune(&mut self, entity: Entity) -> usize {
        let before = self.links.len();
        self.links.retain(|link| !link.touches(entity));
        before - self.links.len()
    }

    /// Structures directly linked to `entity`.
    pub fn neighbours(&self, entity: Entity) -> impl Iterator<Item = Entity> + '_ {
        self.links.iter().filter_map(move |link| {
            if link.source == entity {
                Some(link.destination)
            } else if link.destination == entity {
                Some(link.source)
            } else {
                None
            }
        })
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Links to create when a structure joins the grid.
///
/// `relays` are the live power relays other than `new`, in registry order.
/// The new structure links to the relays it reaches, then each of those
/// relays links on to every relay in its own range. Pairs are returned
/// once each; the graph still filters pairs it already holds.
pub fn plan_links(
    new: Entity,
    kind: ObjectType,
    position: Vec2,
    relays: &[(Entity, Vec2)],
) -> Vec<(Entity, Entity)> {
    let reached: Vec<(Entity, Vec2)> = if kind == ObjectType::PowerRelay {
        relays
            .iter()
            .copied()
            .filter(|&(relay, at)| relay != new && at.distance(position) <= RELAY_LINK_RANGE)
            .collect()
    } else {
        nearest_relay(new, position, relays).into_iter().collect()
    };

    let mut planned = Vec::new();
    for &(relay, _) in &reached {
        push_unique(&mut planned, new, relay);
    }

    // One hop further out from each relay just reached
    for &(relay, relay_at) in &reached {
        for &(other, other_at) in relays {
            if other == relay || other == new {
                continue;
            }
            if relay_at.distance(other_at) <= RELAY_LINK_RANGE {
                push_unique(&mut planned, relay, other);
            }
        }
    }

    planned
}

fn nearest_relay(new: Entity, position: Vec2, relays: &[(Entity, Vec2)]) -> Option<(Entity, Vec2)> {
    let mut nearest: Option<(Entity, Vec2, f32)> = None;
    for &(relay, at) in relays {
        if relay == new {
            continue;
        }
        let distance = at.distance(position);
        if distance > STRUCTURE_LINK_RANGE {
            continue;
        }
        if nearest.map_or(true, |(_, _, best)| distance < best) {
            nearest = Some((relay, at, distance));
        }
    }
    nearest.map(|(relay, at, _)| (relay, at))
}

fn push_unique(planned: &mut Vec<(Entity, Entity)>, a: Entity, b: Entity) {
    if a == b {
        return;
    }
    let duplicate = planned
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a));
    if !duplicate {
        planned.push((a, b));
    }
}
