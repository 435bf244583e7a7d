//! Base map tile layers.

use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// XYZ tile layer described by a URL template.
///
/// The template may contain `{s}`, `{z}`, `{x}` and `{y}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayer {
    pub template: String,
    pub max_zoom: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subdomains: Vec<String>,
}

impl TileLayer {
    pub fn new(template: impl Into<String>, max_zoom: u8) -> Self {
        Self {
            template: template.into(),
            max_zoom,
            subdomains: Vec::new(),
        }
    }

    pub fn with_subdomains(mut self, subdomains: &[&str]) -> Self {
        self.subdomains = subdomains.iter().map(|s| s.to_string()).collect();
        self
    }

    /// URL of the tile at `z/x/y`.
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> String {
        let mut url = self
            .template
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string());
        if !self.subdomains.is_empty() {
            let pick = (u64::from(x) + u64::from(y)) % self.subdomains.len() as u64;
            url = url.replace("{s}", &self.subdomains[pick as usize]);
        }
        url
    }
}

/// Base map presets the viewer can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaseMapStyle {
    #[default]
    OpenStreetMap,
    CartoPositron,
    CartoDarkmatter,
    StamenTerrain,
    StamenToner,
    StamenWatercolor,
}

impl BaseMapStyle {
    pub const ALL: [BaseMapStyle; 6] = [
        BaseMapStyle::OpenStreetMap,
        BaseMapStyle::CartoPositron,
        BaseMapStyle::CartoDarkmatter,
        BaseMapStyle::StamenTerrain,
        BaseMapStyle::StamenToner,
        BaseMapStyle::StamenWatercolor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BaseMapStyle::OpenStreetMap => "open-street-map",
            BaseMapStyle::CartoPositron => "carto-positron",
            BaseMapStyle::CartoDarkmatter => "carto-darkmatter",
            BaseMapStyle::StamenTerrain => "stamen-terrain",
            BaseMapStyle::StamenToner => "stamen-toner",
            BaseMapStyle::StamenWatercolor => "stamen-watercolor",
        }
    }

    /// Human label for pickers ("open-street-map" -> "Open Street Map").
    pub fn label(self) -> String {
        self.name()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn tile_layer(self) -> TileLayer {
        match self {
            BaseMapStyle::OpenStreetMap => {
                TileLayer::new("https://c.tile.openstreetmap.org/{z}/{x}/{y}.png", 18)
            }
            BaseMapStyle::CartoPositron => TileLayer::new(
                "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}.png",
                20,
            )
            .with_subdomains(&["a", "b", "c", "d"]),
            BaseMapStyle::CartoDarkmatter => TileLayer::new(
                "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}.png",
                20,
            )
            .with_subdomains(&["a", "b", "c", "d"]),
            BaseMapStyle::StamenTerrain => TileLayer::new(
                "https://tiles.stadiamaps.com/tiles/stamen_terrain/{z}/{x}/{y}.png",
                18,
            ),
            BaseMapStyle::StamenToner => TileLayer::new(
                "https://tiles.stadiamaps.com/tiles/stamen_toner/{z}/{x}/{y}.png",
                20,
            ),
            BaseMapStyle::StamenWatercolor => TileLayer::new(
                "https://tiles.stadiamaps.com/tiles/stamen_watercolor/{z}/{x}/{y}.jpg",
                16,
            ),
        }
    }
}

impl std::fmt::Display for BaseMapStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for BaseMapStyle {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BaseMapStyle::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| MapError::UnknownBaseMap {
                name: s.to_string(),
            })
    }
}
