use fv_map::*;

fn overlay(layers: &str) -> WmsLayer {
    WmsLayer::new(
        "http://shear.example/geoserver/shear/wms",
        WmsOptions {
            layers: layers.to_string(),
            opacity: 0.5,
            ..WmsOptions::default()
        },
    )
    .unwrap()
}

#[test]
fn writes_through_a_handle_are_seen_by_the_map() {
    let ctx = MapContext::new(
        MapOptions {
            center: LatLng::new(0.317, 32.580).unwrap(),
            zoom: 13,
        },
        BaseMapStyle::default().tile_layer(),
        overlay("run648"),
    );

    let mut handle = ctx.wms_layer();
    handle.set_params(WmsParams::layers("run657"));

    let map = ctx.map();
    let view = map.borrow();
    let on_map = view.overlays()[0].borrow();
    assert_eq!(on_map.layers(), "run657");
    assert_eq!(on_map.revision(), 1);
    assert_eq!(on_map.opacity(), 0.5);
}

#[test]
fn overlay_params_is_usable_behind_a_generic() {
    fn push<O: OverlayParams>(overlay: &mut O, name: &str) {
        overlay.set_params(WmsParams::layers(name));
    }

    let mut layer = overlay("run1");
    push(&mut layer, "run2");
    push(&mut layer, "run2");
    assert_eq!(layer.layers(), "run2");
    assert_eq!(layer.revision(), 2);
}

#[test]
fn get_map_url_reflects_latest_params() {
    let ctx = MapContext::new(
        MapOptions {
            center: LatLng::new(0.0, 0.0).unwrap(),
            zoom: 3,
        },
        BaseMapStyle::CartoPositron.tile_layer(),
        overlay("run648"),
    );
    let bbox: Bbox = "3620000,30000,3640000,40000".parse().unwrap();

    let before = ctx.wms_layer().borrow().get_map_url(&bbox, 256, 256).unwrap();
    ctx.wms_layer().set_params(WmsParams::layers("run662"));
    let after = ctx.wms_layer().borrow().get_map_url(&bbox, 256, 256).unwrap();

    assert!(before.contains("layers=run648"));
    assert!(after.contains("layers=run662"));
    assert!(after.ends_with("bbox=3620000,30000,3640000,40000"));
}

mod urls {
    use fv_map::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn vendor_params_never_leak_reserved_chars(value in ".{0,40}") {
            let layer = WmsLayer::new(
                "http://example.test/wms",
                WmsOptions {
                    layers: "run1".to_string(),
                    extra: [("viewparams".to_string(), value)].into_iter().collect(),
                    ..WmsOptions::default()
                },
            )
            .unwrap();
            let bbox = Bbox::new(0.0, 0.0, 1.0, 1.0).unwrap();
            let url = layer.get_map_url(&bbox, 256, 256).unwrap();
            let query = url.split_once('?').map(|(_, q)| q).unwrap_or_default();
            let pairs: Vec<&str> = query.split('&').collect();
            prop_assert!(pairs.iter().all(|p| p.matches('=').count() == 1));
            prop_assert!(!query.contains(' ') && !query.contains('#'));
        }

        #[test]
        fn tile_urls_have_no_placeholders(z in 0u8..=18, x in 0u32..100_000, y in 0u32..100_000) {
            for style in BaseMapStyle::ALL {
                let url = style.tile_layer().tile_url(z, x, y);
                prop_assert!(!url.contains('{') && !url.contains('}'), "{}", url);
            }
        }
    }
}
