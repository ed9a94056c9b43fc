//! Fundamental grid, identity, and orientation types.
//!
//! World space is right-handed with `y` up. Grid column `x` maps to world `x`,
//! grid row `y` maps to world `z`, so "north" is `+z` and "east" is `+x`.
//! Yaw is measured in degrees, clockwise from north when viewed from above
//! (0 = north, 90 = east).

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::enums::Direction;

/// Integer cell coordinate on the maze grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    /// Column, increasing toward east.
    pub x: u32,
    /// Row, increasing toward north.
    pub y: u32,
}

impl GridCoord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Adjacent cell in `dir`, or `None` if it would leave a `width × height` grid.
    pub fn step(&self, dir: Direction, width: u32, height: u32) -> Option<GridCoord> {
        let (dx, dy) = dir.offset();
        let nx = self.x.checked_add_signed(dx)?;
        let ny = self.y.checked_add_signed(dy)?;
        (nx < width && ny < height).then_some(GridCoord::new(nx, ny))
    }

    /// Whether the cell lies strictly inside the outer ring of the grid.
    pub fn is_interior(&self, width: u32, height: u32) -> bool {
        self.x >= 1 && self.y >= 1 && self.x + 1 < width && self.y + 1 < height
    }

    /// World-space centre of the cell at ground level.
    pub fn to_world(&self, cell_size: f64) -> DVec3 {
        DVec3::new(self.x as f64 * cell_size, 0.0, self.y as f64 * cell_size)
    }
}

/// Stable identifier of a placed turret (index into the placement list).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TurretId(pub u32);

/// Identifier of a live projectile record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(pub u64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks advanced so far.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Wrap a yaw into `[0, 360)`.
pub fn normalize_yaw(yaw_deg: f64) -> f64 {
    yaw_deg.rem_euclid(360.0)
}

/// Signed shortest rotation from `from` to `to`, in `(-180, 180]` degrees.
pub fn yaw_delta(from_deg: f64, to_deg: f64) -> f64 {
    let d = (to_deg - from_deg).rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Yaw (degrees) of a horizontal direction. Returns `None` for vertical or zero vectors.
pub fn yaw_of(direction: DVec3) -> Option<f64> {
    let flat = DVec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() < 1e-12 {
        return None;
    }
    Some(normalize_yaw(flat.x.atan2(flat.z).to_degrees()))
}

/// Rotation for a yaw in degrees. Maps local `+z` (forward) onto the yaw heading.
pub fn yaw_rotation(yaw_deg: f64) -> DQuat {
    DQuat::from_rotation_y(yaw_deg.to_radians())
}

/// Unit forward vector for a yaw in degrees.
pub fn yaw_forward(yaw_deg: f64) -> DVec3 {
    yaw_rotation(yaw_deg) * DVec3::Z
}
