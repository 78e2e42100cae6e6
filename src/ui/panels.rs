use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::BandType;
use crate::state::{AppState, ViewKind};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / view switcher.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_data_dir_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for band in BandType::ALL {
            let selected = state.view == ViewKind::Band(band);
            if ui.selectable_label(selected, band.letter()).clicked() {
                state.show_band(band);
            }
        }
        if ui
            .selectable_label(state.view == ViewKind::Labels, "Labels")
            .clicked()
        {
            state.show_labels();
        }

        ui.separator();

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – scene selection and view controls
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Scene");
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        ui.text_edit_singleline(&mut state.scene_entry);
        if ui.button("Load").clicked() {
            let name = state.scene_entry.clone();
            state.set_scene(&name);
        }
    });
    ui.label(
        RichText::new(format!("data dir: {}", state.viewer.data_dir().display())).weak(),
    );
    ui.separator();

    match state.view {
        ViewKind::Band(band) => band_controls(ui, state, band),
        ViewKind::Labels => label_controls(ui, state),
    }
}

fn band_controls(ui: &mut Ui, state: &mut AppState, band: BandType) {
    // Copy out what the widgets need so the loop below can mutate state.
    let info = state
        .raster
        .as_ref()
        .map(|r| (r.width(), r.height(), r.channels()));

    let Some((width, height, channels)) = info else {
        ui.label("No image loaded.");
        return;
    };

    ui.label(format!("{band} band: {width}x{height}, {channels} channel(s)"));

    if channels > 1 {
        ui.add_space(4.0);
        ui.strong("Channel");
        let selected_text = match state.channel {
            None => "Composite".to_string(),
            Some(ch) => format!("{ch}"),
        };
        egui::ComboBox::from_id_salt("channel")
            .selected_text(selected_text)
            .show_ui(ui, |ui: &mut Ui| {
                if channels >= 3
                    && ui
                        .selectable_label(state.channel.is_none(), "Composite")
                        .clicked()
                {
                    state.set_channel(None);
                }
                for ch in 0..channels {
                    if ui
                        .selectable_label(state.channel == Some(ch), format!("{ch}"))
                        .clicked()
                    {
                        state.set_channel(Some(ch));
                    }
                }
            });
    }
}

fn label_controls(ui: &mut Ui, state: &mut AppState) {
    let classes: Vec<(u32, usize)> = state
        .viewer
        .polygons()
        .iter()
        .map(|(&class, multi)| (class, multi.0.len()))
        .collect();

    if classes.is_empty() {
        ui.label("No labels for this scene.");
        return;
    }

    ui.strong(format!(
        "Classes ({}/{})",
        state.visible_classes.len(),
        classes.len()
    ));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (class, polygon_count) in classes {
                let color = state
                    .color_map
                    .as_ref()
                    .map(|m| m.color_for(class))
                    .unwrap_or(Color32::GRAY);

                let mut checked = state.visible_classes.contains(&class);
                let text =
                    RichText::new(format!("class {class}  ({polygon_count})")).color(color);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_class(class);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_data_dir_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open scene data directory")
        .pick_folder();

    if let Some(dir) = folder {
        log::info!("data directory set to {}", dir.display());
        state.set_data_dir(dir);
    }
}
