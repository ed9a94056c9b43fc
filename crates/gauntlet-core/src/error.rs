//! Error types shared by generation, placement, and configuration.

use thiserror::Error;

/// Failures raised before a maze is carved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("invalid maze dimensions {width}x{height}: both must be at least {min}")]
    InvalidDimensions { width: u32, height: u32, min: u32 },
}

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(f64),
    #[error("probability for {field} must lie in [0, 1], got {value}")]
    InvalidProbability { field: &'static str, value: f64 },
    #[error("engage range {engage} exceeds patrol range {patrol}")]
    RangeOrder { engage: f64, patrol: f64 },
    #[error("{field} must be non-negative, got {value}")]
    NegativeValue { field: &'static str, value: f64 },
    #[error("{field} must be positive, got {value}")]
    NonPositiveValue { field: &'static str, value: f64 },
}
