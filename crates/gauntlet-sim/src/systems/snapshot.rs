//! Snapshot system: queries the ECS world and builds a complete SimSnapshot.
//!
//! This system is read-only. It never modifies the world.

use glam::DVec3;
use hecs::World;

use gauntlet_core::enums::GamePhase;
use gauntlet_core::events::SimEvent;
use gauntlet_core::projectile::Projectile;
use gauntlet_core::state::{ProjectileView, SimSnapshot, TurretView};
use gauntlet_core::types::{GridCoord, ProjectileId, SimTime, TurretId};
use gauntlet_turret_ai::TurretController;

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    player_position: DVec3,
    player_incapacitated: bool,
    events: Vec<SimEvent>,
) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        phase,
        player_position,
        player_incapacitated,
        turrets: build_turrets(world),
        projectiles: build_projectiles(world),
        events,
    }
}

fn build_turrets(world: &World) -> Vec<TurretView> {
    let mut turrets: Vec<TurretView> = world
        .query::<(&TurretId, &GridCoord, &TurretController)>()
        .iter()
        .map(|(_, (id, cell, controller))| TurretView {
            id: *id,
            cell: *cell,
            position: controller.position(),
            yaw_deg: controller.yaw(),
            state: controller.state(),
            firing_phase: controller.firing_phase(),
            active: controller.is_active(),
        })
        .collect();
    turrets.sort_by_key(|t| t.id);
    turrets
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&ProjectileId, &Projectile)>()
        .iter()
        .map(|(_, (id, p))| ProjectileView {
            id: *id,
            position: p.position,
            direction: p.direction,
            speed: p.speed,
            remaining_lifetime: p.remaining_lifetime,
        })
        .collect();
    projectiles.sort_by_key(|p| p.id);
    projectiles
}
