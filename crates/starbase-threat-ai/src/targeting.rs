//! Target priority for enemy ships.

use starbase_core::enums::ObjectType;

/// Structure kinds an enemy ship goes after, most wanted first.
pub const TARGET_PRIORITY: [ObjectType; 4] = [
    ObjectType::Miner,
    ObjectType::PowerRelay,
    ObjectType::Turret,
    ObjectType::CommandCenter,
];

/// Walk the priority list and return the first kind for which `find`
/// yields a target.
///
/// `find` is typically a closest-of-kind query against the registry.
pub fn select_target<T>(mut find: impl FnMut(ObjectType) -> Option<T>) -> Option<T> {
    TARGET_PRIORITY.iter().find_map(|&kind| find(kind))
}
