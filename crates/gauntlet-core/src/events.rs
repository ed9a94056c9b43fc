//! Events emitted by the simulation for rendering, audio, and VFX collaborators.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{ProjectileId, TurretId};

/// Request for the physics/rendering layer to create a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSpawn {
    pub turret: TurretId,
    /// Index of the firing muzzle in declaration order.
    pub muzzle: usize,
    /// World-space muzzle position at the instant of firing.
    pub origin: DVec3,
    /// World-space unit direction of travel.
    pub direction: DVec3,
    /// Aim direction expressed in the muzzle's local frame.
    pub local_direction: DVec3,
    /// Projectile orientation mapping its configured forward axis onto `direction`.
    pub rotation: DQuat,
    pub speed: f64,
    pub lifetime: f64,
}

/// Non-fatal configuration problems surfaced by a turret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurretWarning {
    /// No muzzles configured. The turret never enters Engaging.
    MissingMuzzleConfiguration,
    /// No projectile template assigned. The turret never enters Engaging.
    MissingProjectileTemplate,
}

/// Per-turret output of one controller tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TurretEvent {
    StateChanged {
        turret: TurretId,
        from: TurretState,
        to: TurretState,
    },
    /// Pre-fire cue window opened.
    AnticipationBegin { turret: TurretId },
    /// Pre-fire cue window elapsed; firing starts.
    AnticipationEnd { turret: TurretId },
    /// Muzzle `muzzle`'s anticipation cue turns off just before it fires.
    MuzzleCueOff { turret: TurretId, muzzle: usize },
    /// Muzzle `muzzle`'s anticipation cue is back on after its hold.
    MuzzleCueOn { turret: TurretId, muzzle: usize },
    MuzzleFlashBegin { turret: TurretId, muzzle: usize },
    MuzzleFlashEnd { turret: TurretId, muzzle: usize },
    /// A running firing cycle was aborted; every muzzle's anticipation cue resets.
    CycleCancelled { turret: TurretId },
    /// Continuous audio cues must stop immediately.
    AudioSilenced { turret: TurretId },
    Fire(ProjectileSpawn),
    Warning {
        turret: TurretId,
        warning: TurretWarning,
    },
}

impl TurretEvent {
    /// The turret this event belongs to.
    pub fn turret(&self) -> TurretId {
        match self {
            TurretEvent::StateChanged { turret, .. }
            | TurretEvent::AnticipationBegin { turret }
            | TurretEvent::AnticipationEnd { turret }
            | TurretEvent::MuzzleCueOff { turret, .. }
            | TurretEvent::MuzzleCueOn { turret, .. }
            | TurretEvent::MuzzleFlashBegin { turret, .. }
            | TurretEvent::MuzzleFlashEnd { turret, .. }
            | TurretEvent::CycleCancelled { turret }
            | TurretEvent::AudioSilenced { turret }
            | TurretEvent::Warning { turret, .. } => *turret,
            TurretEvent::Fire(spawn) => spawn.turret,
        }
    }
}

/// Everything the engine reports for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    Turret(TurretEvent),
    /// Player moved beyond activation range; turret is pooled.
    TurretDormant { turret: TurretId },
    /// Player came back within activation range.
    TurretAwake { turret: TurretId },
    ProjectileSpawned {
        projectile: ProjectileId,
        spawn: ProjectileSpawn,
    },
    ProjectileExpired {
        projectile: ProjectileId,
        reason: ExpiryReason,
    },
}
