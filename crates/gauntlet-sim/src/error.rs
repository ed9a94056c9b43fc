//! Errors raised while building a simulation.

use thiserror::Error;

use gauntlet_core::error::{ConfigError, GenerationError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("dungeon generation failed: {0}")]
    Generation(#[from] GenerationError),
}
