//! Headless session runner.
//!
//! Stands in for the game engine: walks the player from the spawn to the exit
//! along the maze path, feeds positions to the simulation each tick, and plays
//! the collision layer by reporting projectiles that reach the player or the
//! floor. Damage is counted here, not in the simulation.

use glam::DVec3;
use serde::Serialize;
use tracing::{debug, info};

use gauntlet_core::commands::SimCommand;
use gauntlet_core::constants::{DT, PLAYER_SPAWN_HEIGHT};
use gauntlet_core::enums::{ExpiryReason, ImpactKind};
use gauntlet_core::events::{SimEvent, TurretEvent};
use gauntlet_core::state::SimSnapshot;
use gauntlet_core::types::GridCoord;
use gauntlet_procgen::Maze;
use gauntlet_sim::{SimulationEngine, TickInput};

/// Projectiles closer than this to the player count as a hit.
pub const HIT_RADIUS: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub max_ticks: u64,
    pub dt: f64,
    /// Player walking speed in metres per second.
    pub walk_speed: f64,
    /// Player hits before the player is incapacitated. `None` never.
    pub hits_to_incapacitate: Option<u32>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_ticks: 3600,
            dt: DT,
            walk_speed: 4.0,
            hits_to_incapacitate: Some(5),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub turrets: usize,
    pub ticks: u64,
    pub elapsed_secs: f64,
    pub shots_fired: u64,
    pub player_hits: u64,
    pub ground_hits: u64,
    pub projectiles_timed_out: u64,
    pub state_changes: u64,
    pub warnings: u64,
    pub reached_exit: bool,
    pub incapacitated: bool,
}

/// Cells from `from` to `to` through open walls, both ends included.
/// Empty when `to` is unreachable.
pub fn route(maze: &Maze, from: GridCoord, to: GridCoord) -> Vec<GridCoord> {
    let dist = maze.path_distances(from);
    let index = |c: GridCoord| (c.y * maze.width() + c.x) as usize;
    let Some(mut remaining) = dist.get(index(to)).copied().flatten() else {
        return Vec::new();
    };

    let mut path = vec![to];
    let mut current = to;
    while remaining > 0 {
        let Some(prev) = maze
            .passages(current)
            .find(|n| dist[index(*n)] == Some(remaining - 1))
        else {
            break;
        };
        path.push(prev);
        current = prev;
        remaining -= 1;
    }
    path.reverse();
    path
}

/// Moves a point along waypoints at constant speed.
#[derive(Debug, Clone)]
pub struct Walker {
    waypoints: Vec<DVec3>,
    next: usize,
    position: DVec3,
    speed: f64,
}

impl Walker {
    pub fn new(start: DVec3, waypoints: Vec<DVec3>, speed: f64) -> Self {
        Self {
            waypoints,
            next: 0,
            position: start,
            speed,
        }
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn arrived(&self) -> bool {
        self.next >= self.waypoints.len()
    }

    pub fn advance(&mut self, dt: f64) -> DVec3 {
        let mut budget = self.speed * dt;
        while budget > 0.0 {
            let Some(target) = self.waypoints.get(self.next) else {
                break;
            };
            let to_target = *target - self.position;
            let distance = to_target.length();
            if distance <= budget {
                self.position = *target;
                budget -= distance;
                self.next += 1;
            } else {
                self.position += to_target / distance * budget;
                budget = 0.0;
            }
        }
        self.position
    }
}

/// Collision stand-in: impacts for projectiles touching the player or floor.
pub fn detect_impacts(snapshot: &SimSnapshot, player: DVec3) -> Vec<SimCommand> {
    snapshot
        .projectiles
        .iter()
        .filter_map(|p| {
            let kind = if p.position.distance(player) <= HIT_RADIUS {
                ImpactKind::PlayerHit
            } else if p.position.y <= 0.0 {
                ImpactKind::GroundHit
            } else {
                return None;
            };
            Some(SimCommand::ReportImpact {
                projectile: p.id,
                kind,
            })
        })
        .collect()
}

fn tally(summary: &mut SessionSummary, events: &[SimEvent]) {
    for event in events {
        match event {
            SimEvent::ProjectileSpawned { .. } => summary.shots_fired += 1,
            SimEvent::ProjectileExpired { reason, .. } => match reason {
                ExpiryReason::LifetimeElapsed => summary.projectiles_timed_out += 1,
                ExpiryReason::Impact(ImpactKind::PlayerHit) => summary.player_hits += 1,
                ExpiryReason::Impact(_) => summary.ground_hits += 1,
            },
            SimEvent::Turret(TurretEvent::StateChanged { .. }) => summary.state_changes += 1,
            SimEvent::Turret(TurretEvent::Warning { .. }) => summary.warnings += 1,
            _ => {}
        }
    }
}

/// Walk the player to the exit, ticking `engine` until arrival or `max_ticks`.
/// `observer` sees every snapshot.
pub fn run_session(
    engine: &mut SimulationEngine,
    options: &SessionOptions,
    mut observer: impl FnMut(&SimSnapshot),
) -> SessionSummary {
    let layout = engine.layout().clone();
    let cell_size = layout.cell_size;
    let waypoints: Vec<DVec3> = route(engine.maze(), layout.spawn_cell, layout.exit_cell)
        .into_iter()
        .map(|c| c.to_world(cell_size) + DVec3::Y * PLAYER_SPAWN_HEIGHT)
        .collect();
    info!(
        waypoints = waypoints.len(),
        turrets = layout.turrets.len(),
        "session started"
    );

    let mut walker = Walker::new(layout.player_spawn, waypoints, options.walk_speed);
    let mut summary = SessionSummary {
        seed: engine.config().seed,
        turrets: layout.turrets.len(),
        ..Default::default()
    };
    let mut pending: Vec<SimCommand> = Vec::new();
    let mut hits_seen: u32 = 0;

    for _ in 0..options.max_ticks {
        engine.queue_commands(pending.drain(..));

        let position = if summary.incapacitated {
            walker.position()
        } else {
            walker.advance(options.dt)
        };
        let snapshot = engine.tick(TickInput {
            player_position: position,
            dt: options.dt,
            player_incapacitated: summary.incapacitated,
        });
        tally(&mut summary, &snapshot.events);

        pending = detect_impacts(&snapshot, position);
        for command in &pending {
            if let SimCommand::ReportImpact {
                projectile,
                kind: ImpactKind::PlayerHit,
            } = command
            {
                hits_seen += 1;
                debug!(projectile = projectile.0, hits = hits_seen, "player hit");
            }
        }
        if !summary.incapacitated
            && options
                .hits_to_incapacitate
                .is_some_and(|limit| hits_seen >= limit)
        {
            info!(tick = snapshot.time.tick, "player incapacitated");
            summary.incapacitated = true;
        }

        summary.ticks = snapshot.time.tick;
        summary.elapsed_secs = snapshot.time.elapsed_secs;
        observer(&snapshot);

        if walker.arrived() && !summary.incapacitated {
            info!(tick = snapshot.time.tick, "player reached the exit");
            summary.reached_exit = true;
            break;
        }
    }

    // Hand over impacts detected on the last tick.
    if !pending.is_empty() {
        engine.queue_commands(pending.drain(..));
        let snapshot = engine.tick(TickInput {
            player_position: walker.position(),
            dt: 0.0,
            player_incapacitated: summary.incapacitated,
        });
        tally(&mut summary, &snapshot.events);
        observer(&snapshot);
    }

    info!(
        shots = summary.shots_fired,
        hits = summary.player_hits,
        reached_exit = summary.reached_exit,
        "session finished"
    );
    summary
}
