//! Simulation engine for GAUNTLET.
//!
//! Owns the hecs ECS world, generates the dungeon once at startup, runs
//! systems in a fixed order each tick, and produces `SimSnapshot`s for the
//! rendering, audio, and physics collaborators.

pub mod engine;
pub mod error;
pub mod systems;
pub mod world_setup;

pub use gauntlet_core as core;
pub use engine::{SimulationEngine, TickInput};
pub use error::SimError;

#[cfg(test)]
mod tests;
