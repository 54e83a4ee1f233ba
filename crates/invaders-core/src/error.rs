//! Configuration errors. These are the only fatal errors of the simulation
//! and are reported before the first tick.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("formation must have at least one column")]
    NoColumns,
    #[error("invader types contribute no rows")]
    NoRows,
    #[error("fire window min {min} is greater than max {max}")]
    FireWindowInverted { min: f32, max: f32 },
    #[error("fire window bounds must be non-negative, got [{min}, {max}]")]
    NegativeFireWindow { min: f32, max: f32 },
    #[error("pitch step must be greater than zero")]
    ZeroPitchStep,
    #[error("y spacing must be positive, got {0}")]
    InvalidYSpacing(f32),
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("march width must be positive, got {0}")]
    InvalidMarchWidth(f32),
    #[error("invader type at index {index} has an empty name")]
    EmptyTypeName { index: usize },
    #[error("invader type name {0:?} is used more than once")]
    DuplicateTypeName(String),
    #[error("invalid configuration json: {0}")]
    Parse(#[from] serde_json::Error),
}
