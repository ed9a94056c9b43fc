//! Turret AI for GAUNTLET.
//!
//! Implements the distance-band state machine, the multi-muzzle firing
//! cycle, per-shot aiming, and the `TurretController` that ties them together.
//! Timers are explicit phase state advanced once per tick.

pub mod aim;
pub mod controller;
pub mod firing;
pub mod fsm;

pub use gauntlet_core as core;

pub use controller::{TickContext, TurretController};
