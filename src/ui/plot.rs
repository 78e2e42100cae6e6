use eframe::egui::{Color32, Stroke, TextureOptions, Ui};
use egui_plot::{Legend, Plot, PlotImage, PlotPoint, PlotPoints, Polygon};

use crate::color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Band view (central panel)
// ---------------------------------------------------------------------------

/// Render the current band as a pannable/zoomable image.
pub fn raster_view(ui: &mut Ui, state: &mut AppState) {
    if state.raster.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No image loaded for this band");
        });
        return;
    }

    // Upload the texture lazily; it is dropped whenever the raster or the
    // selected channel changes.
    if state.texture.is_none() {
        let raster = state.raster.as_ref().unwrap();
        let image = color::raster_to_color_image(raster, state.channel);
        state.texture = Some(
            ui.ctx()
                .load_texture("scene_raster", image, TextureOptions::NEAREST),
        );
    }

    let texture = state.texture.as_ref().unwrap();
    let size = texture.size_vec2();

    Plot::new("band_plot")
        .data_aspect(1.0)
        .show(ui, |plot_ui| {
            plot_ui.image(PlotImage::new(
                texture.id(),
                PlotPoint::new(size.x as f64 / 2.0, size.y as f64 / 2.0),
                size,
            ));
        });
}

// ---------------------------------------------------------------------------
// Label view (central panel)
// ---------------------------------------------------------------------------

/// Render every label polygon as a filled patch, colored by class type, on a
/// square auto-scaled canvas. An empty label set renders an empty canvas.
pub fn label_plot(ui: &mut Ui, state: &AppState) {
    let polygons = state.viewer.polygons();

    Plot::new("label_plot")
        .legend(Legend::default())
        .view_aspect(1.0)
        .data_aspect(1.0)
        .show(ui, |plot_ui| {
            for (&class, multi) in polygons {
                if !state.visible_classes.contains(&class) {
                    continue;
                }
                let stroke_color = state
                    .color_map
                    .as_ref()
                    .map(|m| m.color_for(class))
                    .unwrap_or(Color32::GRAY);

                for polygon in &multi.0 {
                    // Exterior ring only; holes are not drawn.
                    let points: PlotPoints = polygon
                        .exterior()
                        .0
                        .iter()
                        .map(|c| [c.x, c.y])
                        .collect();

                    plot_ui.polygon(
                        Polygon::new(points)
                            .name(format!("class {class}"))
                            .fill_color(stroke_color.gamma_multiply(0.4))
                            .stroke(Stroke::new(1.0, stroke_color)),
                    );
                }
            }
        });
}
