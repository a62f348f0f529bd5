//! Error types for cascade_reveal
//!
//! Animation itself never fails; only loading and validating a
//! [`RevealConfig`](crate::RevealConfig) can.

use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML source could not be parsed
    #[error("Failed to parse reveal config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be written as TOML
    #[error("Failed to serialize reveal config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Total duration must be positive and finite, got {0}")]
    InvalidDuration(f32),

    #[error("Cascade fraction must be in [0, 1), got {0}")]
    InvalidCascadeFraction(f32),

    /// Spring needs positive stiffness and mass and non-negative damping
    #[error("Invalid spring (stiffness {stiffness}, damping {damping}, mass {mass})")]
    InvalidSpring {
        stiffness: f32,
        damping: f32,
        mass: f32,
    },

    #[error("Invalid pose: {0}")]
    InvalidPose(String),

    #[error("Blur radius must be non-negative and finite, got {0}")]
    InvalidBlurRadius(f32),

    #[error("Layout cache capacity must be at least 1")]
    ZeroCacheCapacity,
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
