//! Core types and definitions for the GAUNTLET dungeon simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! grid coordinates, enums, configuration, commands, events, snapshots,
//! error types, and the passive projectile record.
//! It has no dependency on any game engine or runtime framework.

pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod projectile;
pub mod state;
pub mod types;
