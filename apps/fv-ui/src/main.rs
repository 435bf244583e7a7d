#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod views;

use app::FloodViewApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let config_path = std::env::args_os().nth(1).map(std::path::PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_title("FloodView"),
        ..Default::default()
    };

    eframe::run_native(
        "FloodView",
        options,
        Box::new(move |cc| Ok(Box::new(FloodViewApp::new(cc, config_path)?))),
    )
}
