//! Grid model and randomized depth-first maze carving.
//!
//! Walls are stored per cell as a bitmask but only ever changed in pairs, so
//! the wall between two neighbours reads the same from both sides. Carving
//! uses an explicit stack rather than recursion.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use gauntlet_core::enums::Direction;
use gauntlet_core::error::GenerationError;
use gauntlet_core::types::GridCoord;

const ALL_WALLS: u8 = 0b1111;

/// One grid unit: four wall flags and a generation-time visited flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    walls: u8,
    visited: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            walls: ALL_WALLS,
            visited: false,
        }
    }
}

impl Cell {
    pub fn has_wall(&self, dir: Direction) -> bool {
        self.walls & dir.wall_bit() != 0
    }

    /// Raw wall bitmask (see [`Direction::wall_bit`]).
    pub fn wall_mask(&self) -> u8 {
        self.walls
    }

    pub fn visited(&self) -> bool {
        self.visited
    }

    /// Open sides in scan order (N, S, E, W).
    pub fn open_sides(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::SCAN_ORDER
            .into_iter()
            .filter(|d| !self.has_wall(*d))
    }

    pub fn open_count(&self) -> u8 {
        4 - self.walls.count_ones() as u8
    }
}

/// A `width × height` grid of cells, row-major with row 0 at the south edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Maze {
    /// Fully walled, unvisited grid. Fails if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, GenerationError> {
        if width == 0 || height == 0 {
            return Err(GenerationError::InvalidDimensions {
                width,
                height,
                min: 1,
            });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    fn index(&self, coord: GridCoord) -> usize {
        coord.y as usize * self.width as usize + coord.x as usize
    }

    pub fn cell(&self, coord: GridCoord) -> Option<&Cell> {
        self.contains(coord).then(|| &self.cells[self.index(coord)])
    }

    /// All coordinates, row by row from the south edge.
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| GridCoord::new(x, y)))
    }

    /// Wall state on one side of a cell. Out-of-range cells read as walled.
    pub fn has_wall(&self, coord: GridCoord, dir: Direction) -> bool {
        self.cell(coord).is_none_or(|c| c.has_wall(dir))
    }

    /// Neighbour across `dir`, if it exists.
    pub fn neighbor(&self, coord: GridCoord, dir: Direction) -> Option<GridCoord> {
        coord.step(dir, self.width, self.height)
    }

    /// Remove the wall on `dir` of `coord` and the matching wall of its neighbour.
    /// Returns `false` (and changes nothing) on the outer boundary.
    pub fn open_wall(&mut self, coord: GridCoord, dir: Direction) -> bool {
        let Some(next) = self.contains(coord).then(|| self.neighbor(coord, dir)).flatten() else {
            return false;
        };
        let (a, b) = (self.index(coord), self.index(next));
        self.cells[a].walls &= !dir.wall_bit();
        self.cells[b].walls &= !dir.opposite().wall_bit();
        true
    }

    /// Number of open walls between adjacent cells, each counted once.
    pub fn open_wall_count(&self) -> usize {
        self.coords()
            .map(|c| {
                [Direction::North, Direction::East]
                    .into_iter()
                    .filter(|d| self.neighbor(c, *d).is_some() && !self.has_wall(c, *d))
                    .count()
            })
            .sum()
    }

    /// Open neighbours of a cell in scan order.
    pub fn passages(&self, coord: GridCoord) -> impl Iterator<Item = GridCoord> + '_ {
        Direction::SCAN_ORDER
            .into_iter()
            .filter(move |d| !self.has_wall(coord, *d))
            .filter_map(move |d| self.neighbor(coord, d))
    }

    /// Path length through open walls from `start` to every cell, row-major.
    /// Unreachable cells are `None`.
    pub fn path_distances(&self, start: GridCoord) -> Vec<Option<u32>> {
        let mut dist = vec![None; self.cells.len()];
        if !self.contains(start) {
            return dist;
        }
        let mut queue = VecDeque::new();
        dist[self.index(start)] = Some(0);
        queue.push_back(start);
        while let Some(current) = queue.pop_front() {
            let d = dist[self.index(current)].unwrap_or(0);
            for next in self.passages(current) {
                let idx = self.index(next);
                if dist[idx].is_none() {
                    dist[idx] = Some(d + 1);
                    queue.push_back(next);
                }
            }
        }
        dist
    }

    fn mark_visited(&mut self, coord: GridCoord) {
        let idx = self.index(coord);
        self.cells[idx].visited = true;
    }

    fn is_visited(&self, coord: GridCoord) -> bool {
        self.cells[self.index(coord)].visited
    }
}

/// Carve a perfect maze from a seed. Same seed and size give the same walls.
pub fn generate(width: u32, height: u32, seed: u64) -> Result<Maze, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let maze = generate_with_rng(width, height, &mut rng)?;
    debug!(
        width,
        height,
        seed,
        open_walls = maze.open_wall_count(),
        "maze carved"
    );
    Ok(maze)
}

/// Carve a perfect maze drawing from a caller-supplied random source.
pub fn generate_with_rng<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    rng: &mut R,
) -> Result<Maze, GenerationError> {
    let mut maze = Maze::new(width, height)?;
    carve(&mut maze, rng);
    Ok(maze)
}

/// Randomized iterative backtracker. Neighbour probe order is N, E, S, W; the
/// choice among unvisited neighbours is a fresh uniform draw each step.
fn carve<R: Rng + ?Sized>(maze: &mut Maze, rng: &mut R) {
    const PROBE: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    let start = GridCoord::new(rng.gen_range(0..maze.width), rng.gen_range(0..maze.height));
    maze.mark_visited(start);
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let mut options = [Direction::North; 4];
        let mut count = 0;
        for dir in PROBE {
            if let Some(next) = maze.neighbor(current, dir) {
                if !maze.is_visited(next) {
                    options[count] = dir;
                    count += 1;
                }
            }
        }

        if count == 0 {
            stack.pop();
            continue;
        }

        let dir = options[rng.gen_range(0..count)];
        if let Some(next) = maze.neighbor(current, dir) {
            maze.open_wall(current, dir);
            maze.mark_visited(next);
            stack.push(next);
        }
    }
}
