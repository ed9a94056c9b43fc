//! Serializable configuration for dungeon generation, turrets, and sessions.
//!
//! Every struct defaults to the original game's tuning values and can be
//! loaded from JSON. Call `validate()` before use.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{Difficulty, ProjectileForward, Topology};
use crate::error::ConfigError;

/// Spawn probability per topology tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub dead_end: f64,
    pub corner: f64,
    pub intersection: f64,
}

impl DifficultyProfile {
    /// Preset table for a difficulty level.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let [dead_end, corner, intersection] = match difficulty {
            Difficulty::Easy => EASY_PROBABILITIES,
            Difficulty::Medium => MEDIUM_PROBABILITIES,
            Difficulty::Hard => HARD_PROBABILITIES,
        };
        Self {
            dead_end,
            corner,
            intersection,
        }
    }

    /// Spawn probability for a topology tag.
    pub fn probability(&self, topology: Topology) -> f64 {
        match topology {
            Topology::DeadEnd => self.dead_end,
            Topology::Corner => self.corner,
            Topology::Intersection => self.intersection,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("dead_end", self.dead_end),
            ("corner", self.corner),
            ("intersection", self.intersection),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { field, value });
            }
        }
        Ok(())
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::default())
    }
}

/// Maze size, scale, and placement difficulty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub width: u32,
    pub height: u32,
    pub cell_size: f64,
    pub difficulty: Difficulty,
    /// Explicit table overriding the `difficulty` preset.
    pub probabilities: Option<DifficultyProfile>,
    pub turret_height_offset: f64,
    pub wall_height_offset: f64,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_MAZE_WIDTH,
            height: DEFAULT_MAZE_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            difficulty: Difficulty::default(),
            probabilities: None,
            turret_height_offset: TURRET_HEIGHT_OFFSET,
            wall_height_offset: WALL_HEIGHT_OFFSET,
        }
    }
}

impl DungeonConfig {
    /// The probability table in effect: explicit override, else the preset.
    pub fn profile(&self) -> DifficultyProfile {
        self.probabilities
            .unwrap_or_else(|| DifficultyProfile::for_difficulty(self.difficulty))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        self.profile().validate()
    }
}

/// One projectile emitter on a turret, in declaration (firing) order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MuzzleMount {
    /// Offset from the turret pivot in the turret's local frame.
    pub offset: DVec3,
    /// Mount orientation relative to the turret body.
    #[serde(default)]
    pub rotation: DQuat,
    /// Local projectile axis aligned with the aim direction.
    #[serde(default)]
    pub forward: ProjectileForward,
}

impl MuzzleMount {
    pub fn new(offset: DVec3) -> Self {
        Self {
            offset,
            rotation: DQuat::IDENTITY,
            forward: ProjectileForward::Forward,
        }
    }

    /// Same mount turned `yaw_deg` about the turret's vertical axis.
    pub fn with_yaw(self, yaw_deg: f64) -> Self {
        Self {
            rotation: DQuat::from_rotation_y(yaw_deg.to_radians()),
            ..self
        }
    }
}

/// Kinematic template for spawned projectiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileTemplate {
    pub speed: f64,
    pub lifetime: f64,
}

impl Default for ProjectileTemplate {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            lifetime: PROJECTILE_LIFETIME,
        }
    }
}

/// Sinusoidal patrol sweep parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolConfig {
    pub enabled: bool,
    pub sweep_angle_deg: f64,
    pub sweep_speed: f64,
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sweep_angle_deg: PATROL_SWEEP_ANGLE_DEG,
            sweep_speed: PATROL_SWEEP_SPEED,
        }
    }
}

/// Per-turret ranges, timings, muzzles, and projectile template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurretConfig {
    pub patrol_range: f64,
    pub engage_range: f64,
    pub rotation_speed_deg_per_sec: f64,
    /// Added to the tracking yaw to correct a model's visual facing.
    pub model_facing_offset_deg: f64,
    pub muzzles: Vec<MuzzleMount>,
    pub projectile: Option<ProjectileTemplate>,
    pub anticipation_duration: f64,
    pub per_muzzle_cooldown: f64,
    pub cycle_delay: f64,
    pub muzzle_flash_duration: f64,
    pub patrol: PatrolConfig,
}

impl Default for TurretConfig {
    fn default() -> Self {
        Self {
            patrol_range: PATROL_RANGE,
            engage_range: ENGAGE_RANGE,
            rotation_speed_deg_per_sec: ROTATION_SPEED_DEG_PER_SEC,
            model_facing_offset_deg: 0.0,
            muzzles: vec![
                MuzzleMount::new(DVec3::new(-0.3, 0.6, 0.5)),
                MuzzleMount::new(DVec3::new(0.0, 0.6, 0.5)),
                MuzzleMount::new(DVec3::new(0.3, 0.6, 0.5)),
            ],
            projectile: Some(ProjectileTemplate::default()),
            anticipation_duration: ANTICIPATION_DURATION,
            per_muzzle_cooldown: PER_MUZZLE_COOLDOWN,
            cycle_delay: CYCLE_DELAY,
            muzzle_flash_duration: MUZZLE_FLASH_DURATION,
            patrol: PatrolConfig::default(),
        }
    }
}

impl TurretConfig {
    /// Check ranges, durations, and speeds. An empty muzzle list is allowed here;
    /// the controller reports it at runtime and never fires.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engage_range > self.patrol_range {
            return Err(ConfigError::RangeOrder {
                engage: self.engage_range,
                patrol: self.patrol_range,
            });
        }
        for (field, value) in [
            ("engage_range", self.engage_range),
            ("anticipation_duration", self.anticipation_duration),
            ("per_muzzle_cooldown", self.per_muzzle_cooldown),
            ("cycle_delay", self.cycle_delay),
            ("muzzle_flash_duration", self.muzzle_flash_duration),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::NegativeValue { field, value });
            }
        }
        if !(self.rotation_speed_deg_per_sec > 0.0) {
            return Err(ConfigError::NonPositiveValue {
                field: "rotation_speed_deg_per_sec",
                value: self.rotation_speed_deg_per_sec,
            });
        }
        if let Some(template) = &self.projectile {
            if !(template.speed > 0.0) {
                return Err(ConfigError::NonPositiveValue {
                    field: "projectile.speed",
                    value: template.speed,
                });
            }
            if !(template.lifetime > 0.0) {
                return Err(ConfigError::NonPositiveValue {
                    field: "projectile.lifetime",
                    value: template.lifetime,
                });
            }
        }
        Ok(())
    }
}

/// Configuration for a whole simulation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed. Same seed and inputs reproduce the same session.
    pub seed: u64,
    pub dungeon: DungeonConfig,
    pub turret: TurretConfig,
    /// Turrets farther than this from the player are dormant.
    pub activation_range: f64,
    /// Multiplier applied to every tick's `dt` (0 freezes time).
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            dungeon: DungeonConfig::default(),
            turret: TurretConfig::default(),
            activation_range: ACTIVATION_RANGE,
            time_scale: 1.0,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dungeon.validate()?;
        self.turret.validate()?;
        if !(self.activation_range >= 0.0) {
            return Err(ConfigError::NegativeValue {
                field: "activation_range",
                value: self.activation_range,
            });
        }
        if !(self.time_scale >= 0.0) {
            return Err(ConfigError::NegativeValue {
                field: "time_scale",
                value: self.time_scale,
            });
        }
        Ok(())
    }

    /// Parse a JSON document, filling omitted fields from defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
