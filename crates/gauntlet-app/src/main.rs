use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use gauntlet_app::config::{load_config, Overrides};
use gauntlet_app::game_loop::{run_session, SessionOptions};
use gauntlet_app::logging::init_tracing;
use gauntlet_app::render::{render_lattice, render_maze};
use gauntlet_core::constants::{DT, TRAP_WALL_CHANCE};
use gauntlet_core::enums::Difficulty;
use gauntlet_procgen::{carve_lattice, exit_tile, place_traps};
use gauntlet_sim::SimulationEngine;

/// Procedural dungeon and turret simulation
#[derive(Parser)]
#[command(name = "gauntlet", author, version, about, long_about = None)]
struct Cli {
    /// Default log filter, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct DungeonArgs {
    /// JSON session config; omitted fields take defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a dungeon and print its layout
    Generate {
        #[command(flatten)]
        dungeon: DungeonArgs,
        /// Print a text map instead of JSON
        #[arg(long)]
        ascii: bool,
    },
    /// Run a scripted session walking the player to the exit
    Run {
        #[command(flatten)]
        dungeon: DungeonArgs,
        #[arg(long, default_value_t = 3600)]
        ticks: u64,
        /// Walking speed in metres per second
        #[arg(long, default_value_t = 4.0)]
        walk_speed: f64,
        /// Player hits before incapacitation (0 disables)
        #[arg(long, default_value_t = 5)]
        hits: u32,
        /// Print every snapshot as one JSON line
        #[arg(long)]
        snapshots: bool,
    },
    /// Carve a legacy tile lattice with trap walls
    Lattice {
        #[arg(long, default_value_t = 21)]
        width: u32,
        #[arg(long, default_value_t = 21)]
        height: u32,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = TRAP_WALL_CHANCE)]
        trap_chance: f64,
        /// Number of trap variants
        #[arg(long, default_value_t = 1)]
        trap_kinds: usize,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

impl DungeonArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            seed: self.seed,
            width: self.width,
            height: self.height,
            difficulty: self.difficulty.map(Difficulty::from),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Command::Generate { dungeon, ascii } => {
            let config = load_config(dungeon.config.as_deref(), &dungeon.overrides())?;
            let engine = SimulationEngine::new(config)?;
            if ascii {
                println!("{}", render_maze(engine.maze(), engine.layout()));
            } else {
                let json = serde_json::to_string_pretty(engine.layout())
                    .context("serializing layout")?;
                println!("{json}");
            }
        }
        Command::Run {
            dungeon,
            ticks,
            walk_speed,
            hits,
            snapshots,
        } => {
            let config = load_config(dungeon.config.as_deref(), &dungeon.overrides())?;
            let mut engine = SimulationEngine::new(config)?;
            let options = SessionOptions {
                max_ticks: ticks,
                dt: DT,
                walk_speed,
                hits_to_incapacitate: (hits > 0).then_some(hits),
            };
            let summary = run_session(&mut engine, &options, |snapshot| {
                if snapshots {
                    if let Ok(line) = serde_json::to_string(snapshot) {
                        println!("{line}");
                    }
                }
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).context("serializing summary")?
            );
        }
        Command::Lattice {
            width,
            height,
            seed,
            trap_chance,
            trap_kinds,
        } => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let lattice = carve_lattice(width, height, &mut rng)?;
            let traps = place_traps(&lattice, trap_chance, trap_kinds, &mut rng);
            let exit = exit_tile(&lattice);
            info!(traps = traps.len(), exit_x = exit.x, exit_y = exit.y, "lattice ready");
            println!("{}", render_lattice(&lattice, &traps, exit));
        }
    }
    Ok(())
}
