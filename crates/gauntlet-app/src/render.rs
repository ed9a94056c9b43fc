//! Plain-text maps for the terminal. North is at the top.

use gauntlet_core::enums::Direction;
use gauntlet_core::types::GridCoord;
use gauntlet_procgen::{DungeonLayout, Lattice, Maze, TrapWall};

/// Cells are drawn on odd positions of a `(2w+1) x (2h+1)` character grid
/// with walls between them. `S` spawn, `E` exit, `T` turret.
pub fn render_maze(maze: &Maze, layout: &DungeonLayout) -> String {
    let (w, h) = (maze.width() as usize, maze.height() as usize);
    let mut grid = vec![vec!['#'; 2 * w + 1]; 2 * h + 1];
    let at = |c: GridCoord| (2 * c.y as usize + 1, 2 * c.x as usize + 1);

    for coord in maze.coords() {
        let (row, col) = at(coord);
        grid[row][col] = ' ';
        if maze.neighbor(coord, Direction::East).is_some() && !maze.has_wall(coord, Direction::East)
        {
            grid[row][col + 1] = ' ';
        }
        if maze.neighbor(coord, Direction::North).is_some()
            && !maze.has_wall(coord, Direction::North)
        {
            grid[row + 1][col] = ' ';
        }
    }
    for anchor in &layout.turrets {
        let (row, col) = at(anchor.cell);
        grid[row][col] = 'T';
    }
    let (row, col) = at(layout.spawn_cell);
    grid[row][col] = 'S';
    let (row, col) = at(layout.exit_cell);
    grid[row][col] = 'E';

    join_rows(grid)
}

/// `#` wall, `.` open, `T` trap, `E` exit.
pub fn render_lattice(lattice: &Lattice, traps: &[TrapWall], exit: GridCoord) -> String {
    let (w, h) = (lattice.width() as usize, lattice.height() as usize);
    let mut grid = vec![vec!['#'; w]; h];
    for coord in lattice.coords() {
        if lattice.is_open(coord) {
            grid[coord.y as usize][coord.x as usize] = '.';
        }
    }
    for trap in traps {
        grid[trap.tile.y as usize][trap.tile.x as usize] = 'T';
    }
    grid[exit.y as usize][exit.x as usize] = 'E';
    join_rows(grid)
}

fn join_rows(grid: Vec<Vec<char>>) -> String {
    grid.into_iter()
        .rev()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
