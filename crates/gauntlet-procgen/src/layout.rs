//! Geometry handed to the renderer and physics layer: wall segments, the floor
//! slab, player spawn, exit, and turret anchors.

use glam::DVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use gauntlet_core::config::DungeonConfig;
use gauntlet_core::constants::{FLOOR_DEPTH, PLAYER_SPAWN_HEIGHT};
use gauntlet_core::enums::Direction;
use gauntlet_core::error::GenerationError;
use gauntlet_core::types::GridCoord;

use crate::maze::{generate_with_rng, Maze};
use crate::placement::{analyze, select, AnchorFrame, TurretAnchor};

/// One solid wall piece, centred on the cell edge it closes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub cell: GridCoord,
    pub side: Direction,
    pub position: DVec3,
    /// 0 for north/south walls, 90 for east/west walls.
    pub yaw_deg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorSlab {
    pub center: DVec3,
    /// Extent along world x.
    pub size_x: f64,
    /// Extent along world z.
    pub size_z: f64,
}

/// Everything a spawner needs to instantiate one dungeon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonLayout {
    pub width: u32,
    pub height: u32,
    pub cell_size: f64,
    pub walls: Vec<WallSegment>,
    pub floor: FloorSlab,
    pub spawn_cell: GridCoord,
    pub player_spawn: DVec3,
    pub exit_cell: GridCoord,
    pub exit: DVec3,
    pub turrets: Vec<TurretAnchor>,
}

/// Cell the player starts in: the grid centre.
pub fn spawn_cell(maze: &Maze) -> GridCoord {
    GridCoord::new(maze.width() / 2, maze.height() / 2)
}

/// Cell with the longest path from `start`. Ties go to the first cell in
/// row-major order.
pub fn farthest_cell(maze: &Maze, start: GridCoord) -> GridCoord {
    let mut best = (start, 0);
    for (coord, dist) in maze.coords().zip(maze.path_distances(start)) {
        if let Some(d) = dist {
            if d > best.1 {
                best = (coord, d);
            }
        }
    }
    best.0
}

/// Wall segments for every closed wall, each physical wall exactly once.
///
/// Every cell reports its north and east sides; the south row and west column
/// also report the outer boundary behind them.
pub fn wall_segments(maze: &Maze, cell_size: f64, height_offset: f64) -> Vec<WallSegment> {
    let half = cell_size / 2.0;
    let mut walls = Vec::new();
    for coord in maze.coords() {
        let mut sides = vec![Direction::North, Direction::East];
        if coord.y == 0 {
            sides.push(Direction::South);
        }
        if coord.x == 0 {
            sides.push(Direction::West);
        }
        for side in sides {
            if !maze.has_wall(coord, side) {
                continue;
            }
            let (dx, dy) = side.offset();
            let position = coord.to_world(cell_size)
                + DVec3::new(dx as f64 * half, height_offset, dy as f64 * half);
            let yaw_deg = match side {
                Direction::North | Direction::South => 0.0,
                Direction::East | Direction::West => 90.0,
            };
            walls.push(WallSegment {
                cell: coord,
                side,
                position,
                yaw_deg,
            });
        }
    }
    walls
}

/// Assemble the layout for a carved maze and its selected turret anchors.
pub fn build_layout(
    maze: &Maze,
    config: &DungeonConfig,
    turrets: Vec<TurretAnchor>,
) -> DungeonLayout {
    let cs = config.cell_size;
    let (w, h) = (maze.width(), maze.height());
    let spawn = spawn_cell(maze);
    let exit_cell = farthest_cell(maze, spawn);

    let layout = DungeonLayout {
        width: w,
        height: h,
        cell_size: cs,
        walls: wall_segments(maze, cs, config.wall_height_offset),
        floor: FloorSlab {
            center: DVec3::new(
                (w - 1) as f64 * cs / 2.0,
                FLOOR_DEPTH,
                (h - 1) as f64 * cs / 2.0,
            ),
            size_x: w as f64 * cs,
            size_z: h as f64 * cs,
        },
        spawn_cell: spawn,
        player_spawn: spawn.to_world(cs) + DVec3::Y * PLAYER_SPAWN_HEIGHT,
        exit_cell,
        exit: exit_cell.to_world(cs),
        turrets,
    };
    debug!(
        walls = layout.walls.len(),
        turrets = layout.turrets.len(),
        exit_x = exit_cell.x,
        exit_y = exit_cell.y,
        "dungeon layout built"
    );
    layout
}

/// Carve, analyse, select, and lay out a dungeon from one random stream.
pub fn build_dungeon<R: Rng + ?Sized>(
    config: &DungeonConfig,
    rng: &mut R,
) -> Result<(Maze, DungeonLayout), GenerationError> {
    let maze = generate_with_rng(config.width, config.height, rng)?;
    let profile = config.profile();
    let candidates = analyze(&maze, &profile);
    let anchors = select(&candidates, &profile, AnchorFrame::from(config), rng);
    let layout = build_layout(&maze, config, anchors);
    Ok((maze, layout))
}
