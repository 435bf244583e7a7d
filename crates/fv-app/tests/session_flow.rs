//! End-to-end: config file -> session -> selection -> overlay requests.

use std::cell::RefCell;
use std::rc::Rc;

use fv_app::{SelectionChange, compile_session, load_session};
use fv_config::{ViewerConfig, save_yaml};
use fv_core::RunId;
use fv_map::{BaseMapStyle, Bbox};

#[test]
fn selection_updates_the_shared_overlay() {
    let mut session = compile_session(&ViewerConfig::default()).unwrap();
    let overlay = session.map().wms_layer();
    assert_eq!(overlay.borrow().layers(), "run648");

    session.selector_mut().set_indices(2, 1).unwrap();
    session.selector_mut().find_run();

    assert_eq!(session.selector().run().id, RunId::new(655));
    assert_eq!(overlay.borrow().layers(), "run655");
    assert_eq!(overlay.borrow().revision(), 1);
    // viewparams stays at the configured constant.
    assert_eq!(overlay.borrow().param("viewparams"), Some(r#"{"run_id":624}"#));
}

#[test]
fn overlay_url_tracks_selection() {
    let mut session = compile_session(&ViewerConfig::default()).unwrap();
    let bbox: Bbox = "3620000,30000,3640000,40000".parse().unwrap();

    session.selector_mut().select_run(RunId::new(662)).unwrap();
    let url = session.overlay_url(&bbox, 256, 256).unwrap();

    assert!(url.starts_with("http://shear.ncl.ac.uk:8080/geoserver/shear/wms?"));
    assert!(url.contains("layers=run662"));
    assert!(url.contains("transparent=true"));
}

#[test]
fn ui_style_subscriber_re_renders_from_the_map() {
    let mut session = compile_session(&ViewerConfig::default()).unwrap();
    let overlay = session.map().wms_layer();
    let rendered = Rc::new(RefCell::new(Vec::new()));
    {
        let rendered = Rc::clone(&rendered);
        let overlay = Rc::clone(&overlay);
        session.selector_mut().subscribe(move |change| {
            if let SelectionChange::RunChanged { .. } = change {
                rendered
                    .borrow_mut()
                    .push(overlay.borrow().layers().to_string());
            }
        });
    }

    session.selector_mut().select_run(RunId::new(651)).unwrap();
    session.selector_mut().set_indices(4, 0).unwrap();
    session.selector_mut().find_run();

    assert_eq!(*rendered.borrow(), vec!["run651", "run660"]);
}

#[test]
fn load_session_from_yaml() {
    let mut config = ViewerConfig::default();
    config.name = "Session from disk".to_string();
    config.map.base_map = BaseMapStyle::StamenTerrain;
    config.map.zoom = 11;

    let path = std::env::temp_dir().join("fv_app_session_flow.yaml");
    save_yaml(&path, &config).unwrap();

    let session = load_session(&path).unwrap();
    assert_eq!(session.config().name, "Session from disk");

    let map = session.map().map();
    assert_eq!(map.borrow().zoom(), 11);
    assert!(
        map.borrow()
            .base_layer()
            .is_some_and(|b| b.template.contains("stamen_terrain"))
    );
}
