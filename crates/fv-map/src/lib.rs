//! fv-map: map view state for floodview.
//!
//! The map widget that fetches and draws tiles lives outside this crate. What
//! lives here is the state it is driven from: the view (center + zoom), the
//! base tile layer and the WMS overlay whose parameters select which
//! simulation run is shown.
//!
//! [`MapContext`] is constructed once by the application root and hands out
//! shared handles to the map view and the overlay layer. Anything that needs
//! to re-parameterize the overlay goes through the [`OverlayParams`] seam.

pub mod context;
pub mod error;
pub mod geo;
pub mod tile;
pub mod wms;

pub use context::{MapContext, MapHandle, MapOptions, MapView};
pub use error::{MapError, MapResult};
pub use geo::{Bbox, LatLng};
pub use tile::{BaseMapStyle, TileLayer};
pub use wms::{OverlayParams, WmsLayer, WmsLayerHandle, WmsOptions, WmsParams};
