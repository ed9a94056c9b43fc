//! Passive kinematic projectile record.
//!
//! No state machine and no reference back to the firing turret: the tick loop
//! advances it, and it expires on lifetime or a reported impact.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::events::ProjectileSpawn;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub position: DVec3,
    /// Unit direction of travel.
    pub direction: DVec3,
    pub speed: f64,
    /// Seconds until the record expires.
    pub remaining_lifetime: f64,
}

impl Projectile {
    /// Create a projectile. A zero direction is kept as zero (the record never moves).
    pub fn spawn(position: DVec3, direction: DVec3, speed: f64, lifetime: f64) -> Self {
        Self {
            position,
            direction: direction.normalize_or_zero(),
            speed,
            remaining_lifetime: lifetime,
        }
    }

    pub fn from_spawn(spawn: &ProjectileSpawn) -> Self {
        Self::spawn(spawn.origin, spawn.direction, spawn.speed, spawn.lifetime)
    }

    /// Integrate one step: `position += direction * speed * dt`, consume lifetime.
    pub fn advance(&mut self, dt: f64) {
        self.position += self.direction * self.speed * dt;
        self.remaining_lifetime -= dt;
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_lifetime <= 0.0
    }
}
