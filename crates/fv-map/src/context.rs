//! The map context: one map view plus the overlay it carries.

use std::cell::RefCell;
use std::rc::Rc;

use crate::geo::LatLng;
use crate::tile::{BaseMapStyle, TileLayer};
use crate::wms::{WmsLayer, WmsLayerHandle};

pub type MapHandle = Rc<RefCell<MapView>>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u8,
}

/// View state of the map widget and the layers stacked on it, bottom first.
#[derive(Debug)]
pub struct MapView {
    center: LatLng,
    zoom: u8,
    base: Option<TileLayer>,
    overlays: Vec<WmsLayerHandle>,
}

impl MapView {
    pub fn new(options: MapOptions) -> Self {
        Self {
            center: options.center,
            zoom: options.zoom,
            base: None,
            overlays: Vec::new(),
        }
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Deepest zoom the current base layer serves; 18 with no base layer.
    pub fn max_zoom(&self) -> u8 {
        self.base.as_ref().map_or(18, |b| b.max_zoom)
    }

    /// Move the view. Zoom is clamped to the base layer's range.
    pub fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.center = center;
        self.set_zoom(zoom);
    }

    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom.min(self.max_zoom());
    }

    pub fn base_layer(&self) -> Option<&TileLayer> {
        self.base.as_ref()
    }

    /// Replace the base layer. Overlays stay above it.
    pub fn set_base_layer(&mut self, layer: TileLayer) {
        self.base = Some(layer);
        self.zoom = self.zoom.min(self.max_zoom());
    }

    pub fn add_overlay(&mut self, layer: WmsLayerHandle) {
        self.overlays.push(layer);
    }

    pub fn overlays(&self) -> &[WmsLayerHandle] {
        &self.overlays
    }
}

/// Owns the map view and the run overlay.
///
/// Built once by the application root; consumers get shared handles, never
/// copies, so a parameter change made through [`MapContext::wms_layer`] is the
/// change the map renders.
#[derive(Debug)]
pub struct MapContext {
    map: MapHandle,
    wms_layer: WmsLayerHandle,
}

impl MapContext {
    pub fn new(options: MapOptions, base: TileLayer, overlay: WmsLayer) -> Self {
        let mut view = MapView::new(options);
        view.set_base_layer(base);

        let wms_layer = Rc::new(RefCell::new(overlay));
        view.add_overlay(Rc::clone(&wms_layer));

        tracing::debug!(
            lat = options.center.lat,
            lng = options.center.lng,
            zoom = view.zoom(),
            "map context created"
        );

        Self {
            map: Rc::new(RefCell::new(view)),
            wms_layer,
        }
    }

    pub fn map(&self) -> MapHandle {
        Rc::clone(&self.map)
    }

    pub fn wms_layer(&self) -> WmsLayerHandle {
        Rc::clone(&self.wms_layer)
    }

    pub fn set_base_map(&self, style: BaseMapStyle) {
        self.map.borrow_mut().set_base_layer(style.tile_layer());
        tracing::debug!(style = style.name(), "base map changed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wms::WmsOptions;

    fn context() -> MapContext {
        MapContext::new(
            MapOptions {
                center: LatLng::new(0.317, 32.580).unwrap(),
                zoom: 13,
            },
            BaseMapStyle::OpenStreetMap.tile_layer(),
            WmsLayer::new(
                "http://example.test/wms",
                WmsOptions {
                    layers: "run648".to_string(),
                    opacity: 0.5,
                    ..WmsOptions::default()
                },
            )
            .unwrap(),
        )
    }

    #[test]
    fn handles_are_shared() {
        let ctx = context();
        assert!(Rc::ptr_eq(&ctx.map(), &ctx.map()));
        assert!(Rc::ptr_eq(&ctx.wms_layer(), &ctx.wms_layer()));

        let map = ctx.map();
        let view = map.borrow();
        assert_eq!(view.overlays().len(), 1);
        assert!(Rc::ptr_eq(&view.overlays()[0], &ctx.wms_layer()));
    }

    #[test]
    fn zoom_is_clamped_to_base_layer() {
        let ctx = context();
        let map = ctx.map();
        map.borrow_mut().set_zoom(25);
        assert_eq!(map.borrow().zoom(), 18);

        ctx.set_base_map(BaseMapStyle::CartoPositron);
        map.borrow_mut().set_zoom(20);
        assert_eq!(map.borrow().zoom(), 20);

        ctx.set_base_map(BaseMapStyle::StamenWatercolor);
        assert_eq!(map.borrow().zoom(), 16);
    }

    #[test]
    fn base_map_swap_keeps_overlay() {
        let ctx = context();
        ctx.set_base_map(BaseMapStyle::StamenToner);
        let map = ctx.map();
        let view = map.borrow();
        assert_eq!(
            view.base_layer().map(|b| b.template.as_str()),
            Some("https://tiles.stadiamaps.com/tiles/stamen_toner/{z}/{x}/{y}.png")
        );
        assert_eq!(view.overlays().len(), 1);
    }
}
