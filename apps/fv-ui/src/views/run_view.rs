use fv_app::{RunSelector, SelectorResult};
use fv_core::RunId;
use fv_map::WmsLayerHandle;

/// One control edit collected during a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
enum RunEdit {
    Select(RunId),
    AmountIndex(usize),
    DurationIndex(usize),
    Find,
}

fn apply_edit<O: fv_map::OverlayParams>(
    selector: &mut RunSelector<O>,
    edit: RunEdit,
) -> SelectorResult<()> {
    match edit {
        RunEdit::Select(id) => selector.select_run(id),
        RunEdit::AmountIndex(index) => selector.set_amount_index(index),
        RunEdit::DurationIndex(index) => selector.set_duration_index(index),
        RunEdit::Find => {
            selector.find_run();
            Ok(())
        }
    }
}

/// Run picker plus the amount/duration controls.
///
/// Edits go straight to the selector; the view keeps no selection state of
/// its own and redraws from the selector every frame.
#[derive(Default)]
pub struct RunView {
    time: f64,
}

impl RunView {
    /// Draw the controls and apply any edit. Returns a message when the
    /// selector rejected it.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        selector: &mut RunSelector<WmsLayerHandle>,
    ) -> Option<String> {
        let mut edits = Vec::new();

        ui.heading("Run");

        let current = *selector.run();
        let mut picked: Option<RunId> = None;
        egui::ComboBox::from_id_salt("run_combo")
            .selected_text(run_label(current.id, current.amount, current.duration))
            .width(220.0)
            .show_ui(ui, |ui| {
                for run in selector.runs() {
                    let label = run_label(run.id, run.amount, run.duration);
                    if ui.selectable_label(run.id == current.id, label).clicked() {
                        picked = Some(run.id);
                    }
                }
            });
        if let Some(id) = picked {
            edits.push(RunEdit::Select(id));
        }

        ui.separator();
        ui.heading("Rainfall");

        let amount_marks = selector.amount_marks();
        let mut amount_index = selector.amount_index();
        let amount_label = label_for(&amount_marks, amount_index);
        let amount_changed = ui
            .add(
                egui::Slider::new(&mut amount_index, 0..=amount_marks.len().saturating_sub(1))
                    .show_value(false)
                    .text(format!("Amount: {} mm", amount_label)),
            )
            .changed();
        if amount_changed {
            edits.push(RunEdit::AmountIndex(amount_index));
        }

        let duration_marks = selector.duration_marks();
        let mut duration_index = selector.duration_index();
        let duration_label = label_for(&duration_marks, duration_index);
        let duration_changed = ui
            .add(
                egui::Slider::new(&mut duration_index, 0..=duration_marks.len().saturating_sub(1))
                    .show_value(false)
                    .text(format!("Duration: {} min", duration_label)),
            )
            .changed();
        if duration_changed {
            edits.push(RunEdit::DurationIndex(duration_index));
        }

        if ui.button("Find run").clicked() {
            edits.push(RunEdit::Find);
        }

        let mut rejected = None;
        for edit in edits {
            if let Err(e) = apply_edit(selector, edit) {
                rejected = Some(format!("Edit rejected: {}", e));
            }
        }

        ui.separator();
        ui.horizontal(|ui| {
            ui.label("Time:");
            if ui
                .add(egui::DragValue::new(&mut self.time).speed(1.0))
                .changed()
            {
                selector.update_time(self.time);
            }
        });

        ui.separator();
        let state = selector.snapshot();
        egui::Grid::new("selection_grid").num_columns(2).show(ui, |ui| {
            ui.label("Selected run");
            ui.label(state.run.id.to_string());
            ui.end_row();
            ui.label("Amount");
            ui.label(format!("{} mm", state.amount));
            ui.end_row();
            ui.label("Duration");
            ui.label(format!("{} min", state.duration));
            ui.end_row();
            ui.label("Layer");
            ui.monospace(state.layer);
            ui.end_row();
        });

        rejected
    }
}

fn run_label(id: RunId, amount: u32, duration: u32) -> String {
    format!("Run {}: {} mm / {} min", id, amount, duration)
}

fn label_for(marks: &[(usize, String)], index: usize) -> &str {
    marks
        .iter()
        .find(|(i, _)| *i == index)
        .map(|(_, label)| label.as_str())
        .unwrap_or("?")
}
