//! Simulation snapshot: the complete visible state handed to collaborators each tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{GridCoord, ProjectileId, SimTime, TurretId};

/// Complete simulation state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player_position: DVec3,
    pub player_incapacitated: bool,
    /// Sorted by turret id.
    pub turrets: Vec<TurretView>,
    /// Sorted by projectile id.
    pub projectiles: Vec<ProjectileView>,
    /// Events produced during this tick, in emission order.
    pub events: Vec<SimEvent>,
}

/// Turret pose and state for animation playback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurretView {
    pub id: TurretId,
    pub cell: GridCoord,
    pub position: DVec3,
    pub yaw_deg: f64,
    pub state: TurretState,
    pub firing_phase: Option<FiringPhase>,
    /// False while pooled beyond activation range.
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: ProjectileId,
    pub position: DVec3,
    pub direction: DVec3,
    pub speed: f64,
    pub remaining_lifetime: f64,
}

impl SimSnapshot {
    /// Projectile spawn events emitted this tick.
    pub fn spawned(&self) -> impl Iterator<Item = &crate::events::ProjectileSpawn> {
        self.events.iter().filter_map(|e| match e {
            SimEvent::ProjectileSpawned { spawn, .. } => Some(spawn),
            _ => None,
        })
    }
}
