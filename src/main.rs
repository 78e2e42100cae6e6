mod app;
mod color;
mod data;
mod state;
mod ui;

use app::TerrascopeApp;
use data::model::BandType;
use data::scene::SceneViewer;
use eframe::egui;
use state::{AppState, ViewKind};

/// Defaults supplied by the entry point; the side panel and the File menu
/// can change both at runtime.
const DEFAULT_SCENE: &str = "6100_1_3";
const DEFAULT_DATA_DIR: &str = "data";

fn main() -> eframe::Result {
    env_logger::init();

    let viewer = SceneViewer::new(DEFAULT_SCENE, DEFAULT_DATA_DIR);
    let state = AppState::new(viewer, ViewKind::Band(BandType::Rgb));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Terrascope – Scene Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(TerrascopeApp::new(state)))),
    )
}
