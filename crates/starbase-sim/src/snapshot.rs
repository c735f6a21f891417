//! Snapshot builder: reads the registry and produces a `UniverseSnapshot`.

use hecs::Entity;

use starbase_core::events::UniverseEvent;
use starbase_core::profiles::asteroid_texture;
use starbase_core::state::{LinkView, ObjectView, UniverseSnapshot};

use crate::objects::{object_id, Behavior};
use crate::universe::Universe;

/// Build a snapshot of every live object and link, carrying `events`.
pub fn build_snapshot(universe: &Universe, events: Vec<UniverseEvent>) -> UniverseSnapshot {
    let objects = universe
        .objects()
        .filter_map(|entity| build_object_view(universe, entity))
        .collect();

    let links = universe
        .links()
        .iter()
        .map(|link| LinkView {
            source: object_id(link.source),
            destination: object_id(link.destination),
        })
        .collect();

    UniverseSnapshot {
        time: universe.time(),
        power: universe.power(),
        minerals: universe.minerals(),
        objects,
        links,
        events,
    }
}

fn build_object_view(universe: &Universe, entity: Entity) -> Option<ObjectView> {
    let body = universe.body(entity)?;
    let minerals = universe.asteroid_minerals(entity);
    let texture = match minerals {
        Some(remaining) => asteroid_texture(remaining),
        None => body.kind.texture_key(),
    };

    Some(ObjectView {
        id: object_id(entity),
        kind: body.kind,
        position: body.position,
        heading: body.heading,
        bounds: body.bounds(),
        texture,
        hit_points: universe.hit_points(entity),
        minerals,
        spin: universe.asteroid_spin(entity),
        agent: universe.inspect(entity, Behavior::agent_view).flatten(),
    })
}
