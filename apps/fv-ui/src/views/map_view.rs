use fv_map::{BaseMapStyle, MapContext};

/// Base map picker, zoom control and overlay status.
pub struct MapView {
    base_map: BaseMapStyle,
}

impl MapView {
    pub fn new(base_map: BaseMapStyle) -> Self {
        Self { base_map }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, map: &MapContext) {
        ui.heading("Map");

        let mut picked = self.base_map;
        egui::ComboBox::from_label("Base map")
            .selected_text(picked.label())
            .show_ui(ui, |ui| {
                for style in BaseMapStyle::ALL {
                    ui.selectable_value(&mut picked, style, style.label());
                }
            });
        if picked != self.base_map {
            self.base_map = picked;
            map.set_base_map(picked);
        }

        let handle = map.map();
        {
            let mut view = handle.borrow_mut();
            let mut zoom = view.zoom();
            let max_zoom = view.max_zoom();
            if ui
                .add(egui::Slider::new(&mut zoom, 0..=max_zoom).text("Zoom"))
                .changed()
            {
                view.set_zoom(zoom);
            }
            let center = view.center();
            ui.label(format!(
                "Center: {:.3}, {:.3}  zoom {}",
                center.lat,
                center.lng,
                view.zoom()
            ));
            if let Some(base) = view.base_layer() {
                ui.label(format!("Tiles: {}", base.template));
            }
        }

        ui.separator();
        ui.heading("Overlay");
        let overlay = map.wms_layer();
        let overlay = overlay.borrow();
        egui::Grid::new("overlay_grid").num_columns(2).show(ui, |ui| {
            ui.label("Endpoint");
            ui.monospace(overlay.endpoint());
            ui.end_row();
            for (key, value) in overlay.params().iter() {
                ui.label(key);
                ui.monospace(value);
                ui.end_row();
            }
            ui.label("Opacity");
            ui.label(format!("{:.2}", overlay.opacity()));
            ui.end_row();
            ui.label("Redraws");
            ui.label(overlay.revision().to_string());
            ui.end_row();
        });
    }
}
