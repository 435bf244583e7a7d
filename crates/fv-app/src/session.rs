//! Session compilation: viewer config -> live map context + run selector.

use std::path::Path;

use fv_config::ViewerConfig;
use fv_map::{Bbox, LatLng, MapContext, MapOptions, WmsLayer, WmsLayerHandle, WmsOptions};

use crate::error::AppResult;
use crate::selector::RunSelector;

/// Application root: owns the map context and the selector wired to its
/// overlay.
pub struct ViewerSession {
    config: ViewerConfig,
    map: MapContext,
    selector: RunSelector<WmsLayerHandle>,
}

impl ViewerSession {
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn map(&self) -> &MapContext {
        &self.map
    }

    pub fn selector(&self) -> &RunSelector<WmsLayerHandle> {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut RunSelector<WmsLayerHandle> {
        &mut self.selector
    }

    /// GetMap request the overlay would issue for `bbox` right now.
    pub fn overlay_url(&self, bbox: &Bbox, width: u32, height: u32) -> AppResult<String> {
        let overlay = self.map.wms_layer();
        let url = overlay.borrow().get_map_url(bbox, width, height)?;
        Ok(url)
    }
}

/// Validate `config` and build the map context, then the selector with the
/// context's overlay injected.
pub fn compile_session(config: &ViewerConfig) -> AppResult<ViewerSession> {
    fv_config::validate_config(config)?;

    let catalog = config.run_catalog()?;
    let prefix = config.overlay.layer_prefix.as_str();

    let mut options = WmsOptions {
        layers: catalog.first().layer_name(prefix),
        format: config.overlay.format.clone(),
        transparent: config.overlay.transparent,
        opacity: config.overlay.opacity,
        ..WmsOptions::default()
    };
    if let Some(viewparams) = config
        .overlay
        .viewparams_json()
        .map_err(fv_config::ConfigError::from)?
    {
        options.extra.insert("viewparams".to_string(), viewparams);
    }
    let overlay = WmsLayer::new(config.overlay.endpoint.trim(), options)?;

    let map = MapContext::new(
        MapOptions {
            center: LatLng::new(config.map.center.lat, config.map.center.lng)?,
            zoom: config.map.zoom,
        },
        config.map.base_map.tile_layer(),
        overlay,
    );

    if !catalog.is_total() {
        tracing::warn!(
            missing = catalog.missing_pairs().len(),
            "run catalog has gaps; some amount/duration pairs select nothing"
        );
    }
    tracing::info!(
        config = %config.name,
        runs = catalog.len(),
        base_map = %config.map.base_map,
        "viewer session compiled"
    );

    let selector = RunSelector::with_layer_prefix(catalog, map.wms_layer(), prefix);

    Ok(ViewerSession {
        config: config.clone(),
        map,
        selector,
    })
}

/// Load a YAML viewer config and compile it.
pub fn load_session(path: &Path) -> AppResult<ViewerSession> {
    let config = fv_config::load_yaml(path)?;
    compile_session(&config)
}
