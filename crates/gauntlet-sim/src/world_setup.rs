//! Entity spawn factories for setting up the simulation world.
//!
//! Turrets are spawned once from the placement anchors; projectiles are
//! spawned from fire requests during the tick.

use glam::DVec3;
use hecs::{Entity, World};

use gauntlet_core::config::TurretConfig;
use gauntlet_core::events::ProjectileSpawn;
use gauntlet_core::projectile::Projectile;
use gauntlet_core::types::{ProjectileId, TurretId};
use gauntlet_procgen::TurretAnchor;
use gauntlet_turret_ai::TurretController;

/// Spawn one turret entity per anchor, ids in anchor order. Turrets beyond
/// `activation_range` of `player_spawn` start dormant.
pub fn spawn_turrets(
    world: &mut World,
    anchors: &[TurretAnchor],
    config: &TurretConfig,
    player_spawn: DVec3,
    activation_range: f64,
) -> Vec<Entity> {
    let mut scratch = Vec::new();
    anchors
        .iter()
        .enumerate()
        .map(|(i, anchor)| {
            let id = TurretId(i as u32);
            let mut controller =
                TurretController::new(id, anchor.position, anchor.yaw_deg, config.clone());
            if anchor.position.distance(player_spawn) > activation_range {
                controller.set_active(false, &mut scratch);
            }
            world.spawn((id, anchor.cell, controller))
        })
        .collect()
}

/// Spawn a projectile entity from a fire request.
pub fn spawn_projectile(world: &mut World, id: ProjectileId, spawn: &ProjectileSpawn) -> Entity {
    world.spawn((id, Projectile::from_spawn(spawn)))
}

