mod app;
mod cell;
mod editor;
mod error;
mod export;
mod plan;
mod render;
mod settings;
mod stroke;

use eframe::{egui, NativeOptions};
use tracing_subscriber::EnvFilter;

use crate::app::FloorPlanApp;
use crate::settings::EditorSettings;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = EditorSettings::load();
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Floor Plan Studio",
        options,
        Box::new(|cc| Ok(Box::new(FloorPlanApp::new(cc, settings)))),
    )
}
