//! WMS overlay layer.
//!
//! The layer holds the live GetMap parameter set. Re-parameterizing it (for
//! example swapping `layers` to another run) mutates the layer in place and
//! bumps its revision so the map widget knows to refetch tiles.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::{MapError, MapResult};
use crate::geo::Bbox;

/// Shared handle to the overlay layer. Single-threaded by construction.
pub type WmsLayerHandle = Rc<RefCell<WmsLayer>>;

/// Parameter name -> value mapping applied to a WMS layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WmsParams(BTreeMap<String, String>);

impl WmsParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// A params set holding only `layers`.
    pub fn layers(name: impl Into<String>) -> Self {
        Self::new().with("layers", name)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Capability to re-parameterize a live overlay.
///
/// Fire-and-forget: failures belong to whatever renders the layer.
pub trait OverlayParams {
    fn set_params(&mut self, params: WmsParams);
}

/// Static construction options for a WMS layer.
#[derive(Debug, Clone, PartialEq)]
pub struct WmsOptions {
    pub layers: String,
    pub format: String,
    pub transparent: bool,
    pub opacity: f32,
    pub version: String,
    pub crs: String,
    /// Vendor params passed through verbatim (e.g. GeoServer `viewparams`).
    pub extra: BTreeMap<String, String>,
}

impl Default for WmsOptions {
    fn default() -> Self {
        Self {
            layers: String::new(),
            format: "image/png".to_string(),
            transparent: true,
            opacity: 1.0,
            version: "1.1.1".to_string(),
            crs: "EPSG:3857".to_string(),
            extra: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WmsLayer {
    endpoint: String,
    params: WmsParams,
    opacity: f32,
    crs: String,
    revision: u64,
}

impl WmsLayer {
    pub fn new(endpoint: impl Into<String>, options: WmsOptions) -> MapResult<Self> {
        if !(0.0..=1.0).contains(&options.opacity) {
            return Err(MapError::InvalidOpacity {
                value: options.opacity,
            });
        }

        let mut params = WmsParams::new()
            .with("service", "WMS")
            .with("request", "GetMap")
            .with("version", options.version)
            .with("layers", options.layers)
            .with("styles", "")
            .with("format", options.format)
            .with("transparent", options.transparent.to_string())
            .with("width", "256")
            .with("height", "256");
        for (key, value) in options.extra {
            params.insert(key, value);
        }

        Ok(Self {
            endpoint: endpoint.into(),
            params,
            opacity: options.opacity,
            crs: options.crs,
            revision: 0,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn params(&self) -> &WmsParams {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key)
    }

    pub fn layers(&self) -> &str {
        self.param("layers").unwrap_or_default()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn crs(&self) -> &str {
        &self.crs
    }

    /// Number of parameter updates applied since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// GetMap request for `bbox` (already in the layer CRS) at the given size.
    pub fn get_map_url(&self, bbox: &Bbox, width: u32, height: u32) -> MapResult<String> {
        bbox.validate()?;

        let mut params = self.params.clone();
        params.insert("width", width.to_string());
        params.insert("height", height.to_string());
        // WMS 1.3.0 renamed `srs` to `crs`.
        let crs_key = if self.param("version").is_some_and(|v| v.starts_with("1.3")) {
            "crs"
        } else {
            "srs"
        };
        params.insert(crs_key, self.crs.clone());

        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&");
        let sep = if self.endpoint.contains('?') { '&' } else { '?' };
        Ok(format!(
            "{}{}{}&bbox={}",
            self.endpoint,
            sep,
            query,
            bbox.to_param()
        ))
    }
}

impl OverlayParams for WmsLayer {
    fn set_params(&mut self, params: WmsParams) {
        for (key, value) in params.0 {
            self.params.0.insert(key, value);
        }
        self.revision += 1;
        tracing::debug!(
            layers = self.layers(),
            revision = self.revision,
            "overlay parameters updated"
        );
    }
}

impl OverlayParams for WmsLayerHandle {
    fn set_params(&mut self, params: WmsParams) {
        self.borrow_mut().set_params(params);
    }
}

/// Percent-encode a query component, leaving RFC 3986 unreserved bytes as-is.
fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> WmsLayer {
        let mut extra = BTreeMap::new();
        extra.insert("viewparams".to_string(), r#"{"run_id":624}"#.to_string());
        WmsLayer::new(
            "http://example.test/geoserver/wms",
            WmsOptions {
                layers: "run648".to_string(),
                opacity: 0.5,
                extra,
                ..WmsOptions::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn construction_sets_static_params() {
        let layer = layer();
        assert_eq!(layer.layers(), "run648");
        assert_eq!(layer.param("format"), Some("image/png"));
        assert_eq!(layer.param("transparent"), Some("true"));
        assert_eq!(layer.param("viewparams"), Some(r#"{"run_id":624}"#));
        assert_eq!(layer.opacity(), 0.5);
        assert_eq!(layer.revision(), 0);
    }

    #[test]
    fn set_params_merges_and_bumps_revision() {
        let mut layer = layer();
        layer.set_params(WmsParams::layers("run655"));
        assert_eq!(layer.layers(), "run655");
        assert_eq!(layer.param("viewparams"), Some(r#"{"run_id":624}"#));
        assert_eq!(layer.revision(), 1);
    }

    #[test]
    fn rejects_out_of_range_opacity() {
        let err = WmsLayer::new(
            "http://example.test/wms",
            WmsOptions {
                opacity: 1.5,
                ..WmsOptions::default()
            },
        )
        .unwrap_err();
        assert_eq!(err, MapError::InvalidOpacity { value: 1.5 });
    }

    #[test]
    fn get_map_url_encodes_params() {
        let layer = layer();
        let bbox = Bbox::new(0.0, 0.0, 10.0, 20.0).unwrap();
        let url = layer.get_map_url(&bbox, 512, 256).unwrap();
        assert!(url.starts_with("http://example.test/geoserver/wms?"));
        assert!(url.contains("layers=run648"));
        assert!(url.contains("format=image%2Fpng"));
        assert!(url.contains("viewparams=%7B%22run_id%22%3A624%7D"));
        assert!(url.contains("srs=EPSG%3A3857"));
        assert!(url.contains("width=512"));
        assert!(url.contains("styles=&"));
        assert!(url.ends_with("&bbox=0,0,10,20"));
    }

    #[test]
    fn wms_130_uses_crs_key() {
        let layer = WmsLayer::new(
            "http://example.test/wms?map=flood",
            WmsOptions {
                layers: "run1".to_string(),
                version: "1.3.0".to_string(),
                ..WmsOptions::default()
            },
        )
        .unwrap();
        let bbox = Bbox::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let url = layer.get_map_url(&bbox, 256, 256).unwrap();
        assert!(url.starts_with("http://example.test/wms?map=flood&"));
        assert!(url.contains("crs=EPSG%3A3857"));
        assert!(!url.contains("srs="));
    }
}
