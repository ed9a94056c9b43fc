//! Simulation engine.
//!
//! `SimulationEngine` generates the dungeon once, owns the hecs ECS world,
//! processes collaborator commands, runs all systems, and produces
//! `SimSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::DVec3;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use gauntlet_core::commands::SimCommand;
use gauntlet_core::config::SimConfig;
use gauntlet_core::enums::GamePhase;
use gauntlet_core::events::{ProjectileSpawn, SimEvent};
use gauntlet_core::state::SimSnapshot;
use gauntlet_core::types::{ProjectileId, SimTime};
use gauntlet_procgen::{build_dungeon, DungeonLayout, Maze};
use gauntlet_turret_ai::TickContext;

use crate::error::SimError;
use crate::systems;
use crate::world_setup;

/// Per-tick inputs from the surrounding game loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub player_position: DVec3,
    /// Unscaled seconds since the previous tick.
    pub dt: f64,
    #[serde(default)]
    pub player_incapacitated: bool,
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: SimConfig,
    maze: Maze,
    layout: DungeonLayout,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    next_projectile_id: u64,
    player_position: DVec3,
    player_incapacitated: bool,
    command_queue: VecDeque<SimCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    fire_requests: Vec<ProjectileSpawn>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Validate the config, carve the dungeon, and spawn its turrets.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let (maze, layout) = build_dungeon(&config.dungeon, &mut rng)?;

        let mut world = World::new();
        world_setup::spawn_turrets(
            &mut world,
            &layout.turrets,
            &config.turret,
            layout.player_spawn,
            config.activation_range,
        );

        info!(
            seed = config.seed,
            width = maze.width(),
            height = maze.height(),
            turrets = layout.turrets.len(),
            "simulation initialized"
        );

        Ok(Self {
            world,
            time_scale: config.time_scale,
            player_position: layout.player_spawn,
            config,
            maze,
            layout,
            time: SimTime::default(),
            phase: GamePhase::default(),
            next_projectile_id: 0,
            player_incapacitated: false,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            fire_requests: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self, input: TickInput) -> SimSnapshot {
        self.process_commands();

        self.player_position = input.player_position;
        self.player_incapacitated = input.player_incapacitated;

        if self.phase == GamePhase::Active {
            let dt = input.dt.max(0.0) * self.time_scale;
            self.run_systems(dt);
            self.time.advance(dt);
        } else if self.player_incapacitated {
            self.silence_turrets();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.player_position,
            self.player_incapacitated,
            events,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The carved maze.
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Walls, floor, spawn, exit, and turret anchors.
    pub fn layout(&self) -> &DungeonLayout {
        &self.layout
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::ReportImpact { projectile, kind } => {
                systems::cleanup::expire_on_impact(
                    &mut self.world,
                    projectile,
                    kind,
                    &mut self.events,
                );
            }
            SimCommand::SetTimeScale { scale } => {
                self.time_scale = scale.max(0.0);
            }
            SimCommand::Pause => {
                if self.phase == GamePhase::Active {
                    info!(tick = self.time.tick, "simulation paused");
                    self.phase = GamePhase::Paused;
                }
            }
            SimCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    info!(tick = self.time.tick, "simulation resumed");
                    self.phase = GamePhase::Active;
                }
            }
        }
    }

    /// Apply the incapacitated override without advancing time.
    fn silence_turrets(&mut self) {
        let ctx = TickContext {
            player_position: self.player_position,
            player_incapacitated: true,
            dt: 0.0,
            time: self.time.elapsed_secs,
        };
        systems::turret_ai::run(&mut self.world, &ctx, &mut self.events, &mut self.fire_requests);
        self.fire_requests.clear();
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Activation pooling
        systems::activation::run(
            &mut self.world,
            self.player_position,
            self.config.activation_range,
            &mut self.events,
        );
        // 2. Turret AI (state, rotation, firing cycle)
        let ctx = TickContext {
            player_position: self.player_position,
            player_incapacitated: self.player_incapacitated,
            dt,
            time: self.time.elapsed_secs + dt,
        };
        self.fire_requests.clear();
        systems::turret_ai::run(&mut self.world, &ctx, &mut self.events, &mut self.fire_requests);
        // 3. Projectile integration
        systems::movement::run(&mut self.world, dt);
        // 4. Lifetime expiry
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer, &mut self.events);
        // 5. Spawn this tick's shots at their muzzles
        for spawn in self.fire_requests.drain(..) {
            let projectile = ProjectileId(self.next_projectile_id);
            self.next_projectile_id += 1;
            world_setup::spawn_projectile(&mut self.world, projectile, &spawn);
            self.events
                .push(SimEvent::ProjectileSpawned { projectile, spawn });
        }
    }
}
