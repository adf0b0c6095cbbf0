mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::SalaryScopeApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Single optional argument: path to the input file.
    let data_path: Option<PathBuf> = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Salary Scope – Data Careers Dashboard",
        options,
        Box::new(move |_cc| {
            let app = match &data_path {
                Some(path) => SalaryScopeApp::with_dataset_path(path),
                None => SalaryScopeApp::default(),
            };
            Ok(Box::new(app))
        }),
    )
}
