use eframe::egui;

use crate::state::{AppState, ViewKind};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TerrascopeApp {
    pub state: AppState,
}

impl TerrascopeApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for TerrascopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar and view switcher ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: scene and view controls ----
        egui::SidePanel::left("scene_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: raster or label plot ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            ViewKind::Band(_) => plot::raster_view(ui, &mut self.state),
            ViewKind::Labels => plot::label_plot(ui, &self.state),
        });
    }
}
