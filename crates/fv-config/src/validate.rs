//! Config validation logic.

use crate::schema::{MapDef, OverlayDef, ViewerConfig};

pub const LATEST_VERSION: u32 = 1;

/// Deepest zoom any of the base map presets serve.
const MAX_ZOOM: u8 = 20;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid catalog: {0}")]
    Catalog(#[from] fv_core::CoreError),

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_config(config: &ViewerConfig) -> Result<(), ValidationError> {
    if config.version == 0 || config.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    validate_map(&config.map)?;
    validate_overlay(&config.overlay)?;
    config.run_catalog()?;

    Ok(())
}

fn validate_map(map: &MapDef) -> Result<(), ValidationError> {
    if !map.center.lat.is_finite() || !(-90.0..=90.0).contains(&map.center.lat) {
        return Err(invalid(
            "map.center.lat",
            map.center.lat,
            "latitude must be within [-90, 90]",
        ));
    }
    if !map.center.lng.is_finite() || !(-180.0..=180.0).contains(&map.center.lng) {
        return Err(invalid(
            "map.center.lng",
            map.center.lng,
            "longitude must be within [-180, 180]",
        ));
    }
    let max_zoom = map.base_map.tile_layer().max_zoom.min(MAX_ZOOM);
    if map.zoom > max_zoom {
        return Err(invalid(
            "map.zoom",
            map.zoom,
            &format!("{} serves zoom levels up to {}", map.base_map, max_zoom),
        ));
    }
    Ok(())
}

fn validate_overlay(overlay: &OverlayDef) -> Result<(), ValidationError> {
    let endpoint = overlay.endpoint.trim();
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(invalid(
            "overlay.endpoint",
            &overlay.endpoint,
            "must be an http(s) URL",
        ));
    }
    if overlay.layer_prefix.is_empty() {
        return Err(invalid(
            "overlay.layer_prefix",
            "\"\"",
            "layer prefix must not be empty",
        ));
    }
    if overlay.format.is_empty() {
        return Err(invalid("overlay.format", "\"\"", "format must not be empty"));
    }
    if !(0.0..=1.0).contains(&overlay.opacity) {
        return Err(invalid(
            "overlay.opacity",
            overlay.opacity,
            "opacity must be within [0, 1]",
        ));
    }
    Ok(())
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
