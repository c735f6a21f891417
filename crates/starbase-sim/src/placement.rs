//! Ghost placement of new structures.
//!
//! A ghost is a structure the player is positioning. It is not in the
//! universe: nothing ticks it, queries never see it, and it holds no
//! subscriptions until it is committed.

use glam::Vec2;
use hecs::Entity;

use starbase_core::enums::ObjectType;
use starbase_core::profiles::{half_extent, structure_profile};
use starbase_core::types::Rect;

use crate::error::{Result, SimError};
use crate::objects::Blueprint;
use crate::universe::Universe;

/// A structure being positioned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ghost {
    pub kind: ObjectType,
    pub position: Vec2,
}

impl Ghost {
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position, half_extent(self.kind))
    }
}

/// Holds at most one ghost.
#[derive(Debug, Default)]
pub struct Placement {
    ghost: Option<Ghost>,
}

impl Placement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start placing a structure of `kind`, replacing any current ghost.
    pub fn begin(&mut self, kind: ObjectType, position: Vec2) -> Result<()> {
        if !kind.is_structure() {
            return Err(SimError::NotPlaceable(kind));
        }
        log::debug!("placing {kind:?}");
        self.ghost = Some(Ghost { kind, position });
        Ok(())
    }

    /// Move the ghost to follow the cursor.
    pub fn move_to(&mut self, position: Vec2) -> Result<()> {
        let ghost = self.ghost.as_mut().ok_or(SimError::NoGhost)?;
        ghost.position = position;
        Ok(())
    }

    /// Drop the ghost without adding anything.
    pub fn cancel(&mut self) -> Option<Ghost> {
        self.ghost.take()
    }

    /// Add the ghost to the universe at its current position.
    ///
    /// Charges the structure's mineral cost when the config asks for it. On
    /// error the ghost is kept so the player can try again.
    pub fn commit(&mut self, universe: &mut Universe) -> Result<Entity> {
        let ghost = self.ghost.ok_or(SimError::NoGhost)?;
        let blueprint = Blueprint::structure(ghost.kind, ghost.position)
            .ok_or(SimError::NotPlaceable(ghost.kind))?;

        if universe.config().charge_placement_costs {
            let cost = structure_profile(ghost.kind).map_or(0, |p| p.mineral_cost);
            if universe.minerals() < cost {
                return Err(SimError::InsufficientMinerals {
                    needed: cost,
                    available: universe.minerals(),
                });
            }
            universe.adjust_minerals(-cost);
        }

        self.ghost = None;
        Ok(universe.add_object(blueprint))
    }

    pub fn is_placing(&self) -> bool {
        self.ghost.is_some()
    }

    pub fn ghost_bounds(&self) -> Option<Rect> {
        self.ghost.map(|g| g.bounds())
    }
}
