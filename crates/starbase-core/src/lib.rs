//! Core types and definitions for the STARBASE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! object kinds, agent tasks, steering math, constants, structure
//! profiles, state snapshots and events. It has no dependency on the
//! ECS or any runtime framework.

pub mod constants;
pub mod enums;
pub mod events;
pub mod profiles;
pub mod state;
pub mod steering;
pub mod types;
