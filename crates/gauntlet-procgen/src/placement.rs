//! Strategic turret placement.
//!
//! Interior cells are tagged by local wall topology, then each tagged cell is
//! kept with the difficulty profile's probability for its tag. Outer-ring
//! cells are never candidates: a turret there would face out of the dungeon.

use glam::DVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use gauntlet_core::config::{DifficultyProfile, DungeonConfig};
use gauntlet_core::enums::{Direction, Topology};
use gauntlet_core::types::GridCoord;

use crate::maze::{Cell, Maze};

/// An interior cell eligible for a turret, immutable once analysed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurretCandidate {
    pub cell: GridCoord,
    pub open_sides: u8,
    pub topology: Topology,
    /// First open side in N, S, E, W order.
    pub facing: Direction,
}

/// A selected turret: world position and facing yaw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurretAnchor {
    pub cell: GridCoord,
    pub position: DVec3,
    pub yaw_deg: f64,
    pub topology: Topology,
}

/// Grid-to-world mapping for anchors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorFrame {
    pub cell_size: f64,
    pub height_offset: f64,
}

impl From<&DungeonConfig> for AnchorFrame {
    fn from(config: &DungeonConfig) -> Self {
        Self {
            cell_size: config.cell_size,
            height_offset: config.turret_height_offset,
        }
    }
}

/// Topology tag from the open sides of a cell. Straight corridors and sealed
/// cells have no tag.
pub fn classify(cell: &Cell) -> Option<Topology> {
    let mut open = cell.open_sides();
    match cell.open_count() {
        1 => Some(Topology::DeadEnd),
        2 => {
            let a = open.next()?;
            let b = open.next()?;
            a.is_adjacent_to(b).then_some(Topology::Corner)
        }
        3 | 4 => Some(Topology::Intersection),
        _ => None,
    }
}

/// Tag for every cell of the maze, including the outer ring, row-major.
pub fn classify_all(maze: &Maze) -> Vec<(GridCoord, Option<Topology>)> {
    maze.coords()
        .map(|c| (c, maze.cell(c).and_then(classify)))
        .collect()
}

/// Interior cells with a tag whose spawn probability is non-zero.
pub fn analyze(maze: &Maze, profile: &DifficultyProfile) -> Vec<TurretCandidate> {
    let candidates: Vec<TurretCandidate> = maze
        .coords()
        .filter(|c| c.is_interior(maze.width(), maze.height()))
        .filter_map(|c| {
            let cell = maze.cell(c)?;
            let topology = classify(cell)?;
            if profile.probability(topology) <= 0.0 {
                return None;
            }
            Some(TurretCandidate {
                cell: c,
                open_sides: cell.open_count(),
                topology,
                facing: cell.open_sides().next()?,
            })
        })
        .collect();

    if candidates.is_empty() {
        debug!(
            width = maze.width(),
            height = maze.height(),
            "no turret candidates"
        );
    }
    candidates
}

/// Keep each candidate when one uniform draw in `[0, 1)` falls below its tag's
/// probability. One draw per candidate, in candidate order.
pub fn select<R: Rng + ?Sized>(
    candidates: &[TurretCandidate],
    profile: &DifficultyProfile,
    frame: AnchorFrame,
    rng: &mut R,
) -> Vec<TurretAnchor> {
    let anchors: Vec<TurretAnchor> = candidates
        .iter()
        .filter(|c| rng.gen::<f64>() < profile.probability(c.topology))
        .map(|c| TurretAnchor {
            cell: c.cell,
            position: c.cell.to_world(frame.cell_size) + DVec3::Y * frame.height_offset,
            yaw_deg: c.facing.yaw_deg(),
            topology: c.topology,
        })
        .collect();

    debug!(
        candidates = candidates.len(),
        selected = anchors.len(),
        "turret anchors selected"
    );
    anchors
}
