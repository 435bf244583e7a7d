//! Viewer configuration schema.

use std::collections::BTreeMap;

use fv_core::{CoreResult, DEFAULT_LAYER_PREFIX, Run, RunCatalog};
use fv_map::BaseMapStyle;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WMS_ENDPOINT: &str = "http://shear.ncl.ac.uk:8080/geoserver/shear/wms";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewerConfig {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub map: MapDef,
    #[serde(default)]
    pub overlay: OverlayDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogDef>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            version: crate::LATEST_VERSION,
            name: "Flood runs".to_string(),
            map: MapDef::default(),
            overlay: OverlayDef::default(),
            catalog: None,
        }
    }
}

impl ViewerConfig {
    /// The configured catalog, or the built-in one when none is given.
    pub fn run_catalog(&self) -> CoreResult<RunCatalog> {
        match &self.catalog {
            Some(def) => def.to_catalog(),
            None => Ok(RunCatalog::builtin()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapDef {
    pub center: CenterDef,
    pub zoom: u8,
    #[serde(default)]
    pub base_map: BaseMapStyle,
}

impl Default for MapDef {
    fn default() -> Self {
        Self {
            center: CenterDef {
                lat: 0.317,
                lng: 32.580,
            },
            zoom: 13,
            base_map: BaseMapStyle::OpenStreetMap,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CenterDef {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlayDef {
    pub endpoint: String,
    #[serde(default = "default_layer_prefix")]
    pub layer_prefix: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_transparent")]
    pub transparent: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// GeoServer SQL view parameters, sent JSON-encoded as `viewparams`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub viewparams: BTreeMap<String, serde_json::Value>,
}

impl Default for OverlayDef {
    fn default() -> Self {
        let mut viewparams = BTreeMap::new();
        viewparams.insert("run_id".to_string(), serde_json::Value::from(624));
        Self {
            endpoint: DEFAULT_WMS_ENDPOINT.to_string(),
            layer_prefix: default_layer_prefix(),
            format: default_format(),
            transparent: default_transparent(),
            opacity: default_opacity(),
            viewparams,
        }
    }
}

impl OverlayDef {
    /// `viewparams` as the compact JSON string the server expects.
    pub fn viewparams_json(&self) -> serde_json::Result<Option<String>> {
        if self.viewparams.is_empty() {
            return Ok(None);
        }
        serde_json::to_string(&self.viewparams).map(Some)
    }
}

fn default_layer_prefix() -> String {
    DEFAULT_LAYER_PREFIX.to_string()
}

fn default_format() -> String {
    "image/png".to_string()
}

fn default_transparent() -> bool {
    true
}

fn default_opacity() -> f32 {
    0.5
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogDef {
    pub amounts: Vec<u32>,
    pub durations: Vec<u32>,
    pub runs: Vec<RunDef>,
}

impl CatalogDef {
    pub fn to_catalog(&self) -> CoreResult<RunCatalog> {
        let runs = self
            .runs
            .iter()
            .map(|r| Run::new(r.id, r.amount, r.duration))
            .collect();
        RunCatalog::new(runs, self.amounts.clone(), self.durations.clone())
    }
}

impl From<&RunCatalog> for CatalogDef {
    fn from(catalog: &RunCatalog) -> Self {
        Self {
            amounts: catalog.amounts().to_vec(),
            durations: catalog.durations().to_vec(),
            runs: catalog
                .runs()
                .iter()
                .map(|r| RunDef {
                    id: r.id.get(),
                    amount: r.amount,
                    duration: r.duration,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunDef {
    pub id: u32,
    pub amount: u32,
    pub duration: u32,
}
