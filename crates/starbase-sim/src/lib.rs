//! Simulation engine for STARBASE.
//!
//! Owns the `Universe` registry (a hecs world plus a type-sorted live
//! list), advances every object once per frame, and produces
//! `UniverseSnapshot`s for a renderer.

pub mod bus;
pub mod config;
pub mod error;
pub mod links;
pub mod objects;
pub mod placement;
pub mod snapshot;
pub mod universe;
pub mod world_setup;

pub use starbase_core as core;
pub use universe::Universe;

#[cfg(test)]
mod tests;
