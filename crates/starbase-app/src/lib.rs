//! STARBASE headless driver.
//!
//! Wires the simulation crates together and runs sessions without a
//! renderer.

pub mod game_loop;
