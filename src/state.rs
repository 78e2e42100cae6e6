use std::collections::BTreeSet;
use std::path::PathBuf;

use eframe::egui::TextureHandle;

use crate::color::ClassColorMap;
use crate::data::model::{BandType, Raster};
use crate::data::scene::SceneViewer;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// What the central panel currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Band(BandType),
    Labels,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// The scene being viewed. Replaced wholesale when the scene name or
    /// data directory changes, which also drops its label cache.
    pub viewer: SceneViewer,

    pub view: ViewKind,

    /// Decoded raster of the current band view.
    pub raster: Option<Raster>,

    /// GPU texture of the current raster, uploaded lazily by the plot.
    pub texture: Option<TextureHandle>,

    /// Channel shown for multi-channel rasters; `None` = composite.
    pub channel: Option<usize>,

    /// Colors for the classes present in the loaded labels.
    pub color_map: Option<ClassColorMap>,

    /// Class types currently drawn in the label view.
    pub visible_classes: BTreeSet<u32>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Scene-id text field in the side panel.
    pub scene_entry: String,
}

impl AppState {
    pub fn new(viewer: SceneViewer, view: ViewKind) -> Self {
        let scene_entry = viewer.name().to_string();
        let mut state = AppState {
            viewer,
            view,
            raster: None,
            texture: None,
            channel: None,
            color_map: None,
            visible_classes: BTreeSet::new(),
            status_message: None,
            scene_entry,
        };
        state.switch_view(view);
        state
    }

    pub fn switch_view(&mut self, view: ViewKind) {
        match view {
            ViewKind::Band(band) => self.show_band(band),
            ViewKind::Labels => self.show_labels(),
        }
    }

    /// Load and display one band of the current scene.
    pub fn show_band(&mut self, band: BandType) {
        self.view = ViewKind::Band(band);
        self.texture = None;
        self.channel = None;

        match self.viewer.read_band(band) {
            Ok(raster) => {
                log::info!(
                    "showing {} band of {}: {}x{}, {} channel(s)",
                    band,
                    self.viewer.name(),
                    raster.width(),
                    raster.height(),
                    raster.channels()
                );
                self.raster = Some(raster);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("failed to load {band} band: {e}");
                self.raster = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Display the scene's ground-truth labels, loading them on first use.
    pub fn show_labels(&mut self) {
        self.view = ViewKind::Labels;

        match self.viewer.load_polygons() {
            Ok(()) => {
                let classes: Vec<u32> = self.viewer.polygons().keys().copied().collect();
                self.color_map = Some(ClassColorMap::new(classes.iter().copied()));
                self.visible_classes = classes.into_iter().collect();
                self.status_message = None;
            }
            Err(e) => {
                log::error!("failed to load labels: {e}");
                self.color_map = None;
                self.visible_classes.clear();
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Select the channel of a multi-channel raster (`None` = composite).
    pub fn set_channel(&mut self, channel: Option<usize>) {
        if self.channel != channel {
            self.channel = channel;
            self.texture = None;
        }
    }

    /// Toggle one class in the label view.
    pub fn toggle_class(&mut self, class: u32) {
        if !self.visible_classes.remove(&class) {
            self.visible_classes.insert(class);
        }
    }

    /// Show all classes present in the loaded labels.
    pub fn select_all(&mut self) {
        self.visible_classes = self.viewer.polygons().keys().copied().collect();
    }

    /// Hide all classes.
    pub fn select_none(&mut self) {
        self.visible_classes.clear();
    }

    /// Switch to another scene in the same data directory.
    pub fn set_scene(&mut self, name: &str) {
        let data_dir = self.viewer.data_dir().to_path_buf();
        self.viewer = SceneViewer::new(name, data_dir);
        self.scene_entry = name.to_string();
        self.reload();
    }

    /// Point the viewer at another data directory, keeping the scene name.
    pub fn set_data_dir(&mut self, dir: PathBuf) {
        let name = self.viewer.name().to_string();
        self.viewer = SceneViewer::new(name, dir);
        self.reload();
    }

    fn reload(&mut self) {
        self.raster = None;
        self.texture = None;
        self.switch_view(self.view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::Path;
    use tempfile::tempdir;
    use tiff::encoder::{colortype, TiffEncoder};

    fn write_table(dir: &Path, rows: &str) {
        let mut file = File::create(dir.join("train_wkt_v4.csv")).unwrap();
        write!(file, "ImageId,ClassType,MultipolygonWKT\n{rows}").unwrap();
    }

    fn write_gray_band(path: &Path, width: u32, height: u32) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let samples = vec![500u16; (width * height) as usize];
        let file = File::create(path).unwrap();
        let mut encoder = TiffEncoder::new(file).unwrap();
        encoder
            .write_image::<colortype::Gray16>(width, height, &samples)
            .unwrap();
    }

    #[test]
    fn label_view_tracks_loaded_classes() {
        let dir = tempdir().unwrap();
        write_table(
            dir.path(),
            concat!(
                "S1,1,\"MULTIPOLYGON(((0 0,0 1,1 1,1 0,0 0)))\"\n",
                "S1,4,\"MULTIPOLYGON(((2 2,2 3,3 3,3 2,2 2)))\"\n",
            ),
        );

        let state = AppState::new(SceneViewer::new("S1", dir.path()), ViewKind::Labels);
        assert_eq!(state.view, ViewKind::Labels);
        assert!(state.status_message.is_none());
        assert_eq!(
            state.visible_classes.iter().copied().collect::<Vec<_>>(),
            vec![1, 4]
        );
        assert!(state.color_map.is_some());
    }

    #[test]
    fn empty_label_view_is_not_an_error() {
        let dir = tempdir().unwrap();
        write_table(dir.path(), "S1,1,\"MULTIPOLYGON(((0 0,0 1,1 1,1 0,0 0)))\"\n");

        let state = AppState::new(SceneViewer::new("unlabelled", dir.path()), ViewKind::Labels);
        assert!(state.status_message.is_none());
        assert!(state.visible_classes.is_empty());
    }

    #[test]
    fn missing_band_sets_a_status_message() {
        let dir = tempdir().unwrap();
        let state = AppState::new(
            SceneViewer::new("S1", dir.path()),
            ViewKind::Band(BandType::Rgb),
        );
        assert!(state.raster.is_none());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn band_view_loads_the_raster() {
        let dir = tempdir().unwrap();
        write_gray_band(&dir.path().join("three_band/S1.tif"), 4, 4);

        let state = AppState::new(
            SceneViewer::new("S1", dir.path()),
            ViewKind::Band(BandType::Rgb),
        );
        assert!(state.status_message.is_none());
        let raster = state.raster.as_ref().unwrap();
        assert_eq!((raster.width(), raster.height()), (4, 4));
    }

    #[test]
    fn class_toggles_and_bulk_selection() {
        let dir = tempdir().unwrap();
        write_table(
            dir.path(),
            concat!(
                "S1,1,\"MULTIPOLYGON(((0 0,0 1,1 1,1 0,0 0)))\"\n",
                "S1,2,\"MULTIPOLYGON(((0 0,0 2,2 2,2 0,0 0)))\"\n",
            ),
        );

        let mut state = AppState::new(SceneViewer::new("S1", dir.path()), ViewKind::Labels);
        state.toggle_class(1);
        assert_eq!(state.visible_classes.iter().copied().collect::<Vec<_>>(), [2]);
        state.toggle_class(1);
        assert_eq!(state.visible_classes.len(), 2);

        state.select_none();
        assert!(state.visible_classes.is_empty());
        state.select_all();
        assert_eq!(state.visible_classes.len(), 2);
    }

    #[test]
    fn switching_scene_rebuilds_the_label_cache() {
        let dir = tempdir().unwrap();
        write_table(
            dir.path(),
            concat!(
                "S1,1,\"MULTIPOLYGON(((0 0,0 1,1 1,1 0,0 0)))\"\n",
                "S2,1,\"MULTIPOLYGON(((0 0,0 1,1 1,1 0,0 0)))\"\n",
                "S2,2,\"MULTIPOLYGON(((0 0,0 2,2 2,2 0,0 0)))\"\n",
            ),
        );

        let mut state = AppState::new(SceneViewer::new("S1", dir.path()), ViewKind::Labels);
        assert_eq!(state.visible_classes.len(), 1);

        state.set_scene("S2");
        assert_eq!(state.viewer.name(), "S2");
        assert_eq!(state.visible_classes.len(), 2);
    }

    #[test]
    fn channel_selection_is_tracked() {
        let dir = tempdir().unwrap();
        write_gray_band(&dir.path().join("sixteen_band/S1_M.tif"), 2, 2);

        let mut state = AppState::new(
            SceneViewer::new("S1", dir.path()),
            ViewKind::Band(BandType::M),
        );
        state.set_channel(Some(0));
        assert_eq!(state.channel, Some(0));
        state.set_channel(Some(0));
        assert_eq!(state.channel, Some(0));
        state.set_channel(None);
        assert_eq!(state.channel, None);
    }
}
