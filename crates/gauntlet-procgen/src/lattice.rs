//! Legacy tile-lattice carving.
//!
//! Tiles at odd coordinates are rooms, everything else starts as wall. Carving
//! jumps two tiles at a time and opens the tile in between. Each room shuffles
//! its own direction order when first entered, and the walk keeps that order
//! on its explicit stack so backtracking resumes where it left off.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use gauntlet_core::enums::Direction;
use gauntlet_core::error::GenerationError;
use gauntlet_core::types::GridCoord;

/// Smallest lattice that holds one room.
pub const MIN_LATTICE_SIZE: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lattice {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

/// A wall tile replaced by one of `kinds` trap variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapWall {
    pub tile: GridCoord,
    pub kind: usize,
}

struct Frame {
    tile: GridCoord,
    dirs: [Direction; 4],
    next: usize,
}

impl Lattice {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile(&self, coord: GridCoord) -> Option<Tile> {
        (coord.x < self.width && coord.y < self.height).then(|| self.tiles[self.index(coord)])
    }

    pub fn is_open(&self, coord: GridCoord) -> bool {
        self.tile(coord) == Some(Tile::Open)
    }

    pub fn coords(&self) -> impl Iterator<Item = GridCoord> {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| GridCoord::new(x, y)))
    }

    pub fn open_count(&self) -> usize {
        self.tiles.iter().filter(|t| **t == Tile::Open).count()
    }

    fn index(&self, coord: GridCoord) -> usize {
        coord.y as usize * self.width as usize + coord.x as usize
    }

    fn open(&mut self, coord: GridCoord) {
        let idx = self.index(coord);
        self.tiles[idx] = Tile::Open;
    }

    /// Landing tile two steps away, if it is still inside the border ring.
    fn jump(&self, from: GridCoord, dir: Direction) -> Option<(GridCoord, GridCoord)> {
        let mid = from.step(dir, self.width, self.height)?;
        let to = mid.step(dir, self.width, self.height)?;
        to.is_interior(self.width, self.height).then_some((mid, to))
    }
}

fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> [Direction; 4] {
    let mut dirs = Direction::SCAN_ORDER;
    dirs.shuffle(rng);
    dirs
}

/// Carve a lattice maze. Both dimensions must be at least 3; odd sizes leave
/// no unused strip along the north and east edges.
pub fn carve_lattice<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    rng: &mut R,
) -> Result<Lattice, GenerationError> {
    if width < MIN_LATTICE_SIZE || height < MIN_LATTICE_SIZE {
        return Err(GenerationError::InvalidDimensions {
            width,
            height,
            min: MIN_LATTICE_SIZE,
        });
    }
    let mut lattice = Lattice {
        width,
        height,
        tiles: vec![Tile::Wall; width as usize * height as usize],
    };

    let start = GridCoord::new(
        rng.gen_range(0..(width - 1) / 2) * 2 + 1,
        rng.gen_range(0..(height - 1) / 2) * 2 + 1,
    );
    lattice.open(start);
    let mut stack = vec![Frame {
        tile: start,
        dirs: shuffled(rng),
        next: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.dirs.len() {
            stack.pop();
            continue;
        }
        let dir = frame.dirs[frame.next];
        frame.next += 1;
        let from = frame.tile;

        if let Some((mid, to)) = lattice.jump(from, dir) {
            if !lattice.is_open(to) {
                lattice.open(mid);
                lattice.open(to);
                stack.push(Frame {
                    tile: to,
                    dirs: shuffled(rng),
                    next: 0,
                });
            }
        }
    }

    debug!(width, height, open = lattice.open_count(), "lattice carved");
    Ok(lattice)
}

/// Turn wall tiles into traps. Tiles in the two outer rings are never
/// eligible. Each eligible wall draws once against `chance`, then a hit draws
/// its kind. No traps are placed when `kinds` is zero.
pub fn place_traps<R: Rng + ?Sized>(
    lattice: &Lattice,
    chance: f64,
    kinds: usize,
    rng: &mut R,
) -> Vec<TrapWall> {
    if kinds == 0 {
        return Vec::new();
    }
    let (w, h) = (lattice.width, lattice.height);
    let eligible = |c: &GridCoord| c.x > 1 && c.y > 1 && c.x + 2 < w && c.y + 2 < h;

    lattice
        .coords()
        .filter(|c| eligible(c) && !lattice.is_open(*c))
        .filter_map(|tile| {
            (rng.gen::<f64>() < chance).then(|| TrapWall {
                tile,
                kind: rng.gen_range(0..kinds),
            })
        })
        .collect()
}

/// Open tile farthest in straight-line distance from the corner room (1, 1).
/// Ties go to the first tile in row-major order.
pub fn exit_tile(lattice: &Lattice) -> GridCoord {
    let origin = GridCoord::new(1, 1);
    let dist2 = |c: GridCoord| {
        let dx = c.x as i64 - 1;
        let dy = c.y as i64 - 1;
        dx * dx + dy * dy
    };
    lattice
        .coords()
        .filter(|c| lattice.is_open(*c))
        .fold((origin, 0), |best, c| {
            let d = dist2(c);
            if d > best.1 {
                (c, d)
            } else {
                best
            }
        })
        .0
}
