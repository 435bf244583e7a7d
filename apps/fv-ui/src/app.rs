use crate::views::{MapView, RunView};
use egui_file_dialog::FileDialog;
use fv_app::{AppResult, SelectionChange, ViewerSession, compile_session, load_session};
use fv_config::ViewerConfig;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;

const CHANGE_LOG_LEN: usize = 50;

pub struct FloodViewApp {
    session: ViewerSession,
    config_path: Option<PathBuf>,
    run_view: RunView,
    map_view: MapView,
    file_dialog: FileDialog,
    file_dialog_action: Option<FileDialogAction>,
    change_log: Rc<RefCell<VecDeque<String>>>,
    last_message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FileDialogAction {
    Open,
    Save,
}

impl FloodViewApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config_path: Option<PathBuf>,
    ) -> AppResult<Self> {
        let mut last_message = None;
        let session = match config_path.as_deref().map(load_session) {
            Some(Ok(session)) => session,
            Some(Err(e)) => {
                last_message = Some(format!("Failed to load config: {}", e));
                compile_session(&ViewerConfig::default())?
            }
            None => compile_session(&ViewerConfig::default())?,
        };

        let mut app = Self {
            map_view: MapView::new(session.config().map.base_map),
            session,
            config_path,
            run_view: RunView::default(),
            file_dialog: FileDialog::new(),
            file_dialog_action: None,
            change_log: Rc::new(RefCell::new(VecDeque::new())),
            last_message,
        };
        app.subscribe_change_log();
        Ok(app)
    }

    fn subscribe_change_log(&mut self) {
        let log = Rc::clone(&self.change_log);
        self.session.selector_mut().subscribe(move |change| {
            let line = match change {
                SelectionChange::RunChanged { run, layer } => format!(
                    "run {} ({} mm / {} min) -> layers={}",
                    run.id, run.amount, run.duration, layer
                ),
                SelectionChange::IndicesChanged {
                    amount_index,
                    duration_index,
                } => format!("indices amount={} duration={}", amount_index, duration_index),
            };
            let mut log = log.borrow_mut();
            log.push_front(line);
            log.truncate(CHANGE_LOG_LEN);
        });
    }

    fn open_config(&mut self, path: PathBuf) {
        match load_session(&path) {
            Ok(session) => {
                self.map_view = MapView::new(session.config().map.base_map);
                self.session = session;
                self.config_path = Some(path);
                self.change_log.borrow_mut().clear();
                self.subscribe_change_log();
                self.last_message = None;
            }
            Err(e) => {
                self.last_message = Some(format!("Failed to load config: {}", e));
            }
        }
    }

    fn save_config_as(&mut self, path: PathBuf) {
        if let Err(e) = fv_config::save_yaml(&path, self.session.config()) {
            self.last_message = Some(format!("Failed to save config: {}", e));
        } else {
            self.last_message = Some(format!("Saved config to {}", path.display()));
            self.config_path = Some(path);
        }
    }
}

impl eframe::App for FloodViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open config").clicked() {
                    self.file_dialog_action = Some(FileDialogAction::Open);
                    self.file_dialog.select_file();
                }
                if ui.button("Save config as").clicked() {
                    self.file_dialog_action = Some(FileDialogAction::Save);
                    self.file_dialog.save_file();
                }
                ui.separator();
                ui.label(&self.session.config().name);
                if let Some(path) = &self.config_path {
                    ui.weak(path.display().to_string());
                }
            });
        });

        self.file_dialog.update(ctx);
        if let Some(path) = self.file_dialog.take_selected() {
            match self.file_dialog_action.take() {
                Some(FileDialogAction::Open) => self.open_config(path.to_path_buf()),
                Some(FileDialogAction::Save) => self.save_config_as(path.to_path_buf()),
                None => {}
            }
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            if let Some(msg) = &self.last_message {
                ui.colored_label(egui::Color32::YELLOW, msg);
            }
            egui::CollapsingHeader::new("Changes")
                .default_open(false)
                .show(ui, |ui| {
                    egui::ScrollArea::vertical().max_height(120.0).show(ui, |ui| {
                        for line in self.change_log.borrow().iter() {
                            ui.monospace(line);
                        }
                    });
                });
        });

        egui::SidePanel::left("run_panel")
            .default_width(280.0)
            .show(ctx, |ui| {
                if let Some(msg) = self.run_view.show(ui, self.session.selector_mut()) {
                    self.last_message = Some(msg);
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.map_view.show(ui, self.session.map());
        });
    }
}
