//! Enemy AI for STARBASE.
//!
//! Implements the enemy ship behavior state machine and target-priority
//! selection. Pure functions over plain data; the simulation crate owns
//! the entities and applies the results.

pub mod fsm;
pub mod targeting;

pub use starbase_core as core;
