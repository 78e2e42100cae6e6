use std::path::{Path, PathBuf};

use super::loader;
use super::model::{BandType, PolygonSet, Raster, Result, SceneError};

// ---------------------------------------------------------------------------
// SceneViewer – one named scene's rasters and labels
// ---------------------------------------------------------------------------

/// Resolves and loads the data of a single named scene under a data
/// directory with the layout
///
/// ```text
/// <data_dir>/three_band/<scene>.tif
/// <data_dir>/sixteen_band/<scene>_<A|M|P>.tif
/// <data_dir>/train_wkt_v4.csv
/// ```
///
/// The label table is read at most once per instance; the parsed polygons
/// are cached for the instance's lifetime.
pub struct SceneViewer {
    name: String,
    data_dir: PathBuf,
    labels: PolygonSet,
    labels_loaded: bool,
}

impl SceneViewer {
    pub fn new(name: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        SceneViewer {
            name: name.into(),
            data_dir: data_dir.into(),
            labels: PolygonSet::new(),
            labels_loaded: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Resolve the on-disk path of one band file. No caching; fails when the
    /// resolved path does not exist.
    pub fn band_path(&self, band: BandType) -> Result<PathBuf> {
        let path = match band {
            BandType::Rgb => self
                .data_dir
                .join("three_band")
                .join(format!("{}.tif", self.name)),
            other => self
                .data_dir
                .join("sixteen_band")
                .join(format!("{}_{}.tif", self.name, other.letter())),
        };
        if !path.exists() {
            return Err(SceneError::NotFound(path));
        }
        Ok(path)
    }

    /// Resolve and decode one band.
    pub fn read_band(&self, band: BandType) -> Result<Raster> {
        let path = self.band_path(band)?;
        loader::read_raster(&path)
    }

    pub fn label_table_path(&self) -> PathBuf {
        self.data_dir.join("train_wkt_v4.csv")
    }

    /// Load this scene's labels from the table, at most once per instance.
    ///
    /// The loaded flag is set before the read, so a failed load also counts
    /// as done and is not retried. Calls after the first are no-ops.
    pub fn load_polygons(&mut self) -> Result<()> {
        if self.labels_loaded {
            return Ok(());
        }
        self.labels_loaded = true;

        let path = self.label_table_path();
        self.labels = loader::load_label_table(&path, &self.name)?;
        log::info!(
            "loaded {} label class(es) for scene {}",
            self.labels.len(),
            self.name
        );
        Ok(())
    }

    /// The cached label polygons (empty until [`Self::load_polygons`] ran).
    pub fn polygons(&self) -> &PolygonSet {
        &self.labels
    }
}
