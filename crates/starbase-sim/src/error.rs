//! Error types for fallible simulation operations.

use starbase_core::enums::ObjectType;

/// Errors returned by player-facing simulation operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Only structures can be placed.
    #[error("{0:?} cannot be placed")]
    NotPlaceable(ObjectType),

    /// Commit or move without a ghost.
    #[error("no object is being placed")]
    NoGhost,

    /// The stockpile cannot cover the structure's cost.
    #[error("not enough minerals: need {needed}, have {available}")]
    InsufficientMinerals { needed: i32, available: i32 },
}

pub type Result<T> = std::result::Result<T, SimError>;
