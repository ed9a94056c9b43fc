//! Procedural dungeon generation for GAUNTLET.
//!
//! Carves perfect mazes with an iterative randomized backtracker, classifies
//! cells by wall topology to pick turret anchors, and turns the carved grid
//! into wall, floor, spawn, and exit placements for the engine layer.

pub mod lattice;
pub mod layout;
pub mod maze;
pub mod placement;

pub use gauntlet_core as core;

pub use lattice::{carve_lattice, exit_tile, place_traps, Lattice, Tile, TrapWall};
pub use layout::{build_dungeon, build_layout, DungeonLayout, FloorSlab, WallSegment};
pub use maze::{generate, generate_with_rng, Cell, Maze};
pub use placement::{analyze, classify, select, AnchorFrame, TurretAnchor, TurretCandidate};

#[cfg(test)]
mod tests;
