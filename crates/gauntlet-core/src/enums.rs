//! Enumeration types used throughout the simulation.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Cardinal direction on the maze grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Fixed scan order used when choosing a facing for a turret anchor.
    pub const SCAN_ORDER: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Grid offset `(dx, dy)` of the neighbouring cell.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Wall bit for this side in a cell's wall mask.
    pub fn wall_bit(self) -> u8 {
        match self {
            Direction::North => 0b0001,
            Direction::South => 0b0010,
            Direction::East => 0b0100,
            Direction::West => 0b1000,
        }
    }

    /// Yaw in degrees of a turret facing this side.
    pub fn yaw_deg(self) -> f64 {
        match self {
            Direction::North => 0.0,
            Direction::East => 90.0,
            Direction::South => 180.0,
            Direction::West => 270.0,
        }
    }

    /// Whether two sides meet at a corner (are perpendicular).
    pub fn is_adjacent_to(self, other: Direction) -> bool {
        self != other && self != other.opposite()
    }
}

/// Local wall topology of a maze cell, used to weight turret placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topology {
    /// Exactly one open side.
    DeadEnd,
    /// Exactly two open sides that are perpendicular.
    Corner,
    /// Three or four open sides.
    Intersection,
}

/// Difficulty preset selecting a placement probability table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Turret behaviour state, driven by distance to the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurretState {
    /// Player out of patrol range. Orientation frozen.
    #[default]
    Idle,
    /// Player within patrol range. Sweeping around base yaw.
    Patrolling,
    /// Player within engage range. Tracking and firing.
    Engaging,
}

/// Sub-state of a running firing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FiringPhase {
    /// Pre-fire cue window. No projectile yet.
    Anticipating,
    /// Muzzle `i` has fired; holding the per-muzzle cooldown.
    FiringMuzzle(usize),
    /// All muzzles fired; holding the inter-cycle delay.
    Cooldown,
}

/// Which local axis of a projectile is aligned with the aim direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum ProjectileForward {
    #[default]
    Forward,
    Up,
    Right,
    Custom(DVec3),
}

impl ProjectileForward {
    /// Local-space unit axis. A degenerate custom axis falls back to forward.
    pub fn local_axis(self) -> DVec3 {
        match self {
            ProjectileForward::Forward => DVec3::Z,
            ProjectileForward::Up => DVec3::Y,
            ProjectileForward::Right => DVec3::X,
            ProjectileForward::Custom(v) => v.try_normalize().unwrap_or(DVec3::Z),
        }
    }
}

/// What a projectile struck, as reported by the collision collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactKind {
    PlayerHit,
    GroundHit,
    Other,
}

/// Why a projectile record was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpiryReason {
    LifetimeElapsed,
    Impact(ImpactKind),
}

/// Top-level run state of the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
}
