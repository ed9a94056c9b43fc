//! Tests for the simulation engine: determinism, turret behaviour through the
//! tick loop, projectile lifecycle, commands, and activation pooling.

use glam::DVec3;

use gauntlet_core::commands::SimCommand;
use gauntlet_core::config::{DifficultyProfile, DungeonConfig, SimConfig};
use gauntlet_core::constants::DT;
use gauntlet_core::enums::*;
use gauntlet_core::events::{SimEvent, TurretEvent};
use gauntlet_core::state::{SimSnapshot, TurretView};
use gauntlet_core::types::{ProjectileId, TurretId};

use crate::engine::{SimulationEngine, TickInput};
use crate::error::SimError;

fn dense_config(seed: u64) -> SimConfig {
    SimConfig {
        seed,
        dungeon: DungeonConfig {
            probabilities: Some(DifficultyProfile {
                dead_end: 1.0,
                corner: 1.0,
                intersection: 1.0,
            }),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn input(player_position: DVec3) -> TickInput {
    TickInput {
        player_position,
        dt: DT,
        player_incapacitated: false,
    }
}

fn turret_view(snapshot: &SimSnapshot, id: TurretId) -> &TurretView {
    snapshot.turrets.iter().find(|t| t.id == id).unwrap()
}

fn first_turret_position(engine: &SimulationEngine) -> DVec3 {
    engine.layout().turrets[0].position
}

/// First projectile spawned by turret 0 while the player stands 5 m north of it.
fn engage_until_first_shot(engine: &mut SimulationEngine) -> (ProjectileId, DVec3, DVec3) {
    let player = first_turret_position(engine) + DVec3::new(0.0, 0.0, 5.0);
    for _ in 0..120 {
        let snapshot = engine.tick(input(player));
        for event in &snapshot.events {
            if let SimEvent::ProjectileSpawned { projectile, spawn } = event {
                if spawn.turret == TurretId(0) {
                    return (*projectile, spawn.origin, spawn.direction);
                }
            }
        }
    }
    panic!("turret 0 never fired");
}

// ---- Construction ----

#[test]
fn test_invalid_config_rejected() {
    let mut config = SimConfig::default();
    config.dungeon.cell_size = 0.0;
    assert!(matches!(
        SimulationEngine::new(config),
        Err(SimError::Config(_))
    ));

    let mut config = SimConfig::default();
    config.dungeon.width = 0;
    assert!(matches!(
        SimulationEngine::new(config),
        Err(SimError::Generation(_))
    ));
}

#[test]
fn test_turrets_spawned_from_layout() {
    let mut engine = SimulationEngine::new(dense_config(7)).unwrap();
    let anchors = engine.layout().turrets.clone();
    assert!(!anchors.is_empty());

    let snapshot = engine.tick(input(engine.layout().player_spawn));
    assert_eq!(snapshot.turrets.len(), anchors.len());
    for (i, (view, anchor)) in snapshot.turrets.iter().zip(&anchors).enumerate() {
        assert_eq!(view.id, TurretId(i as u32));
        assert_eq!(view.cell, anchor.cell);
        assert_eq!(view.position, anchor.position);
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(dense_config(12345)).unwrap();
    let mut engine_b = SimulationEngine::new(dense_config(12345)).unwrap();
    let start = engine_a.layout().player_spawn;

    for i in 0..300 {
        let player = start + DVec3::new((i as f64 * 0.05).sin() * 6.0, 0.0, i as f64 * 0.02);
        let snap_a = engine_a.tick(input(player));
        let snap_b = engine_b.tick(input(player));

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let engine_a = SimulationEngine::new(dense_config(111)).unwrap();
    let engine_b = SimulationEngine::new(dense_config(222)).unwrap();
    let json_a = serde_json::to_string(engine_a.layout()).unwrap();
    let json_b = serde_json::to_string(engine_b.layout()).unwrap();
    assert_ne!(json_a, json_b);
}

// ---- Turret behaviour ----

#[test]
fn test_turret_state_follows_player_distance() {
    let mut engine = SimulationEngine::new(dense_config(3)).unwrap();
    let base = first_turret_position(&engine);

    for (offset, expected) in [
        (20.0, TurretState::Idle),
        (15.0, TurretState::Patrolling),
        (5.0, TurretState::Engaging),
        (25.0, TurretState::Idle),
    ] {
        let snapshot = engine.tick(input(base + DVec3::new(0.0, 0.0, offset)));
        assert_eq!(turret_view(&snapshot, TurretId(0)).state, expected, "offset {offset}");
    }
}

#[test]
fn test_leaving_range_cancels_without_firing() {
    let mut engine = SimulationEngine::new(dense_config(3)).unwrap();
    let base = first_turret_position(&engine);
    for _ in 0..10 {
        engine.tick(input(base + DVec3::new(0.0, 0.0, 5.0)));
    }

    let snapshot = engine.tick(input(base + DVec3::new(0.0, 0.0, 25.0)));
    let view = turret_view(&snapshot, TurretId(0));
    assert_eq!(view.state, TurretState::Idle);
    assert_eq!(view.firing_phase, None);
    assert!(snapshot.events.iter().any(|e| matches!(
        e,
        SimEvent::Turret(TurretEvent::CycleCancelled { turret: TurretId(0) })
    )));
    assert!(!snapshot.spawned().any(|s| s.turret == TurretId(0)));
}

#[test]
fn test_incapacitated_player_silences_every_turret() {
    let mut engine = SimulationEngine::new(dense_config(5)).unwrap();
    engage_until_first_shot(&mut engine);
    let player = first_turret_position(&engine) + DVec3::new(0.0, 0.0, 5.0);

    let snapshot = engine.tick(TickInput {
        player_incapacitated: true,
        ..input(player)
    });
    assert!(snapshot.player_incapacitated);
    assert!(snapshot.turrets.iter().all(|t| t.state == TurretState::Idle));
    assert_eq!(snapshot.spawned().count(), 0);
    assert!(snapshot.events.iter().any(|e| matches!(
        e,
        SimEvent::Turret(TurretEvent::AudioSilenced { turret: TurretId(0) })
    )));

    for _ in 0..120 {
        let snapshot = engine.tick(TickInput {
            player_incapacitated: true,
            ..input(player)
        });
        assert_eq!(snapshot.spawned().count(), 0);
    }
}

// ---- Projectiles ----

#[test]
fn test_projectile_moves_and_expires() {
    let mut engine = SimulationEngine::new(dense_config(9)).unwrap();
    let (id, origin, direction) = engage_until_first_shot(&mut engine);
    let player = first_turret_position(&engine) + DVec3::new(0.0, 0.0, 5.0);

    let snapshot = engine.tick(input(player));
    let view = snapshot.projectiles.iter().find(|p| p.id == id).unwrap();
    let expected = origin + direction * view.speed * DT;
    assert!((view.position - expected).length() < 1e-9);

    let mut expired = false;
    for _ in 0..310 {
        let snapshot = engine.tick(input(player));
        expired |= snapshot.events.iter().any(|e| {
            *e == SimEvent::ProjectileExpired {
                projectile: id,
                reason: ExpiryReason::LifetimeElapsed,
            }
        });
        if expired {
            assert!(snapshot.projectiles.iter().all(|p| p.id != id));
            break;
        }
    }
    assert!(expired, "projectile outlived its lifetime");
}

#[test]
fn test_reported_impact_expires_projectile() {
    let mut engine = SimulationEngine::new(dense_config(9)).unwrap();
    let (id, _, _) = engage_until_first_shot(&mut engine);
    let player = first_turret_position(&engine) + DVec3::new(0.0, 0.0, 5.0);

    engine.queue_command(SimCommand::ReportImpact {
        projectile: id,
        kind: ImpactKind::PlayerHit,
    });
    let snapshot = engine.tick(input(player));
    assert!(snapshot.events.contains(&SimEvent::ProjectileExpired {
        projectile: id,
        reason: ExpiryReason::Impact(ImpactKind::PlayerHit),
    }));
    assert!(snapshot.projectiles.iter().all(|p| p.id != id));

    // A second report for the same projectile is ignored.
    engine.queue_command(SimCommand::ReportImpact {
        projectile: id,
        kind: ImpactKind::GroundHit,
    });
    let snapshot = engine.tick(input(player));
    assert!(!snapshot
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::ProjectileExpired { projectile, .. } if *projectile == id)));
}

// ---- Commands ----

#[test]
fn test_pause_and_resume() {
    let mut engine = SimulationEngine::new(dense_config(1)).unwrap();
    let player = first_turret_position(&engine) + DVec3::new(0.0, 0.0, 5.0);
    engine.tick(input(player));
    let before = engine.time();

    engine.queue_command(SimCommand::Pause);
    for _ in 0..30 {
        let snapshot = engine.tick(input(player));
        assert_eq!(snapshot.phase, GamePhase::Paused);
        assert!(snapshot.events.is_empty());
    }
    assert_eq!(engine.time(), before);

    engine.queue_command(SimCommand::Resume);
    let snapshot = engine.tick(input(player));
    assert_eq!(snapshot.phase, GamePhase::Active);
    assert_eq!(snapshot.time.tick, before.tick + 1);
}

#[test]
fn test_incapacitation_applies_while_paused() {
    let mut engine = SimulationEngine::new(dense_config(5)).unwrap();
    engage_until_first_shot(&mut engine);
    let player = first_turret_position(&engine) + DVec3::new(0.0, 0.0, 5.0);
    let before = engine.time();

    engine.queue_command(SimCommand::Pause);
    let snapshot = engine.tick(TickInput {
        player_incapacitated: true,
        ..input(player)
    });
    assert_eq!(snapshot.phase, GamePhase::Paused);
    assert_eq!(engine.time(), before);
    let view = turret_view(&snapshot, TurretId(0));
    assert_eq!(view.state, TurretState::Idle);
    assert_eq!(view.firing_phase, None);
    assert!(snapshot.events.contains(&SimEvent::Turret(TurretEvent::AudioSilenced {
        turret: TurretId(0)
    })));
    assert_eq!(snapshot.spawned().count(), 0);

    engine.queue_command(SimCommand::Resume);
    let snapshot = engine.tick(TickInput {
        player_incapacitated: true,
        ..input(player)
    });
    assert!(snapshot.turrets.iter().all(|t| t.state == TurretState::Idle));
    assert!(!snapshot
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::Turret(TurretEvent::AudioSilenced { .. }))));
    assert_eq!(snapshot.spawned().count(), 0);
}

#[test]
fn test_time_scale_scales_dt() {
    let mut engine = SimulationEngine::new(dense_config(1)).unwrap();
    let spawn = engine.layout().player_spawn;
    engine.queue_command(SimCommand::SetTimeScale { scale: 0.5 });
    let snapshot = engine.tick(input(spawn));
    assert!((snapshot.time.elapsed_secs - DT * 0.5).abs() < 1e-12);
    assert_eq!(engine.time_scale(), 0.5);
}

// ---- Activation pooling ----

#[test]
fn test_distant_turrets_go_dormant_and_wake() {
    let mut config = dense_config(17);
    config.activation_range = 5.0;
    let mut engine = SimulationEngine::new(config).unwrap();
    let base = first_turret_position(&engine);

    let far = DVec3::new(-1000.0, 0.0, -1000.0);
    engine.tick(input(far));
    let snapshot = engine.tick(input(far));
    assert!(snapshot.turrets.iter().all(|t| !t.active));
    assert!(snapshot.events.is_empty());

    let snapshot = engine.tick(input(base + DVec3::new(0.0, 0.0, 3.0)));
    assert!(snapshot
        .events
        .contains(&SimEvent::TurretAwake { turret: TurretId(0) }));
    let view = turret_view(&snapshot, TurretId(0));
    assert!(view.active);
    assert_eq!(view.state, TurretState::Engaging);

    let snapshot = engine.tick(input(far));
    assert!(snapshot
        .events
        .contains(&SimEvent::TurretDormant { turret: TurretId(0) }));
    assert_eq!(turret_view(&snapshot, TurretId(0)).state, TurretState::Idle);
}
