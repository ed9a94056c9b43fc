//! Session configuration: JSON file plus command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use gauntlet_core::config::SimConfig;
use gauntlet_core::enums::Difficulty;

/// Values given on the command line win over the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub difficulty: Option<Difficulty>,
}

impl Overrides {
    pub fn apply(&self, config: &mut SimConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(width) = self.width {
            config.dungeon.width = width;
        }
        if let Some(height) = self.height {
            config.dungeon.height = height;
        }
        if let Some(difficulty) = self.difficulty {
            config.dungeon.difficulty = difficulty;
            config.dungeon.probabilities = None;
        }
    }
}

/// Read a config file (or start from defaults), apply overrides, validate.
pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<SimConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let config = SimConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?;
            info!(path = %path.display(), "loaded config");
            config
        }
        None => SimConfig::default(),
    };
    overrides.apply(&mut config);
    config.validate().context("invalid configuration")?;
    Ok(config)
}
