//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components.

pub mod activation;
pub mod cleanup;
pub mod movement;
pub mod snapshot;
pub mod turret_ai;
