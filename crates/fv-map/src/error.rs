//! Error types for map state.

use thiserror::Error;

pub type MapResult<T> = Result<T, MapError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("Opacity must be within [0, 1], got {value}")]
    InvalidOpacity { value: f32 },

    #[error("Invalid coordinate: {what}")]
    InvalidCoordinate { what: &'static str },

    #[error("Invalid bounding box: {what}")]
    InvalidBbox { what: &'static str },

    #[error("Unknown base map style: {name}")]
    UnknownBaseMap { name: String },
}
