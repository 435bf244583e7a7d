//! Error types for the fv-app service layer.

use std::fmt;

use fv_core::RunId;

/// The two index-valued selection controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Amount,
    Duration,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Amount => f.write_str("amount"),
            Axis::Duration => f.write_str("duration"),
        }
    }
}

/// Rejected selector edits. State is left untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("{axis} index {index} out of range (len={len})")]
    IndexOutOfRange { axis: Axis, index: usize, len: usize },

    #[error("Run {0} is not in the catalog")]
    UnknownRun(RunId),
}

pub type SelectorResult<T> = Result<T, SelectorError>;

/// Application error type that wraps errors from the backend crates
/// and provides a unified error interface for both CLI and GUI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Map error: {0}")]
    Map(String),

    #[error("Selection error: {0}")]
    Selection(#[from] SelectorError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for fv-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<fv_config::ConfigError> for AppError {
    fn from(err: fv_config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<fv_config::ValidationError> for AppError {
    fn from(err: fv_config::ValidationError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<fv_core::CoreError> for AppError {
    fn from(err: fv_core::CoreError) -> Self {
        AppError::Catalog(err.to_string())
    }
}

impl From<fv_map::MapError> for AppError {
    fn from(err: fv_map::MapError) -> Self {
        AppError::Map(err.to_string())
    }
}
