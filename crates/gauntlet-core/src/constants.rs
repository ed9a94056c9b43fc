//! Simulation constants and default tuning parameters.

/// Nominal tick rate of the headless runner (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Slack applied when comparing accumulated timers against durations.
pub const TIMER_EPSILON: f64 = 1e-9;

// --- Dungeon ---

pub const DEFAULT_MAZE_WIDTH: u32 = 15;
pub const DEFAULT_MAZE_HEIGHT: u32 = 15;

/// Edge length of one maze cell in metres.
pub const DEFAULT_CELL_SIZE: f64 = 3.0;

/// Turret anchors are lifted this far above the floor.
pub const TURRET_HEIGHT_OFFSET: f64 = 0.5;

/// Wall segments are lifted this far above the floor.
pub const WALL_HEIGHT_OFFSET: f64 = 1.0;

/// Floor slab sits this far below ground level.
pub const FLOOR_DEPTH: f64 = -0.5;

/// Player spawns this far above the floor.
pub const PLAYER_SPAWN_HEIGHT: f64 = 1.0;

/// Default fraction of eligible lattice walls that become traps.
pub const TRAP_WALL_CHANCE: f64 = 0.12;

// --- Placement probabilities (DeadEnd, Corner, Intersection) ---

pub const EASY_PROBABILITIES: [f64; 3] = [0.4, 0.25, 0.1];
pub const MEDIUM_PROBABILITIES: [f64; 3] = [0.5, 0.35, 0.25];
pub const HARD_PROBABILITIES: [f64; 3] = [0.6, 0.5, 0.4];

// --- Turret ---

/// Beyond this distance a turret is idle.
pub const PATROL_RANGE: f64 = 18.0;

/// Within this distance a turret engages.
pub const ENGAGE_RANGE: f64 = 12.0;

/// Maximum tracking rate while engaging.
pub const ROTATION_SPEED_DEG_PER_SEC: f64 = 180.0;

pub const ANTICIPATION_DURATION: f64 = 0.3;
pub const PER_MUZZLE_COOLDOWN: f64 = 0.2;
pub const CYCLE_DELAY: f64 = 0.3;
pub const MUZZLE_FLASH_DURATION: f64 = 0.08;

/// Half-width of the patrol sweep arc.
pub const PATROL_SWEEP_ANGLE_DEG: f64 = 35.0;

/// Angular frequency of the patrol sweep (radians per second of sim time).
pub const PATROL_SWEEP_SPEED: f64 = 1.0;

// --- Projectile ---

pub const PROJECTILE_SPEED: f64 = 25.0;
pub const PROJECTILE_LIFETIME: f64 = 5.0;

// --- Activation pooling ---

/// Turrets farther than this from the player are dormant.
pub const ACTIVATION_RANGE: f64 = 40.0;
