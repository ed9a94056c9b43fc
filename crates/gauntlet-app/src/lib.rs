//! GAUNTLET headless application.
//!
//! Wires the generation and simulation crates behind a command-line front
//! end: loads configuration, initializes logging, prints generated layouts,
//! and drives scripted sessions that stand in for the game engine.

pub mod config;
pub mod game_loop;
pub mod logging;
pub mod render;

pub use gauntlet_core as core;
