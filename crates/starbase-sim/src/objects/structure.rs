//! Shared structure upkeep.

use hecs::Entity;

use starbase_core::enums::ObjectType;
use starbase_core::profiles::structure_profile;

use crate::universe::Universe;

/// Tick for structures with no behavior beyond power bookkeeping.
pub(crate) fn tick(me: Entity, universe: &mut Universe) {
    if let Some(kind) = universe.kind(me) {
        apply_power_delta(kind, universe);
    }
}

/// Add this kind's per-tick generation or upkeep to the power balance.
pub(crate) fn apply_power_delta(kind: ObjectType, universe: &mut Universe) {
    if let Some(profile) = structure_profile(kind) {
        universe.adjust_power(profile.power_delta);
    }
}
