use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use geo_types::MultiPolygon;
use ndarray::Array3;
use serde::Deserialize;
use tiff::decoder::{Decoder, DecodingResult, Limits};
use wkt::TryFromWkt;

use super::model::{PolygonSet, Raster, Result, SceneError};

// ---------------------------------------------------------------------------
// Raster loader
// ---------------------------------------------------------------------------

/// Decode one band file into a [`Raster`].
///
/// Handles 8- and 16-bit samples with any number of interleaved channels;
/// 8-bit data is widened to the 16-bit range. Anything else (float tiles,
/// palette images) is reported as an unsupported pixel format.
pub fn read_raster(path: &Path) -> Result<Raster> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(BufReader::new(file))?.with_limits(Limits::unlimited());

    let (width, height) = decoder.dimensions()?;
    let (width, height) = (width as usize, height as usize);

    let samples: Vec<u16> = match decoder.read_image()? {
        DecodingResult::U8(buf) => buf.into_iter().map(|v| u16::from(v) << 8).collect(),
        DecodingResult::U16(buf) => buf,
        _ => return Err(SceneError::UnsupportedPixelFormat(path.to_path_buf())),
    };

    if width == 0 || height == 0 || samples.len() % (width * height) != 0 {
        return Err(SceneError::UnsupportedPixelFormat(path.to_path_buf()));
    }
    let channels = samples.len() / (width * height);

    let data = Array3::from_shape_vec((height, width, channels), samples)
        .map_err(|_| SceneError::UnsupportedPixelFormat(path.to_path_buf()))?;

    log::debug!(
        "decoded {}: {}x{}, {} channel(s)",
        path.display(),
        width,
        height,
        channels
    );
    Ok(Raster::new(data))
}

// ---------------------------------------------------------------------------
// Label table loader
// ---------------------------------------------------------------------------

/// One row of `train_wkt_v4.csv`.
#[derive(Debug, Deserialize)]
struct LabelRow {
    #[serde(rename = "ImageId")]
    image_id: String,
    #[serde(rename = "ClassType")]
    class_type: u32,
    #[serde(rename = "MultipolygonWKT")]
    multipolygon_wkt: String,
}

/// Read the label table and parse every class's multi-polygon WKT for the
/// given scene. A scene absent from the table yields an empty set. When a
/// class type appears in several rows, the first row wins.
pub fn load_label_table(path: &Path, scene: &str) -> Result<PolygonSet> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut polygons = PolygonSet::new();

    for row in reader.deserialize() {
        let row: LabelRow = row?;
        if row.image_id != scene || polygons.contains_key(&row.class_type) {
            continue;
        }
        let geometry: MultiPolygon<f64> = MultiPolygon::try_from_wkt_str(&row.multipolygon_wkt)
            .map_err(|e| SceneError::Wkt {
                class: row.class_type,
                message: e.to_string(),
            })?;
        polygons.insert(row.class_type, geometry);
    }

    Ok(polygons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use tiff::encoder::{colortype, TiffEncoder};

    const HEADER: &str = "ImageId,ClassType,MultipolygonWKT\n";

    fn write_table(dir: &Path, rows: &str) -> std::path::PathBuf {
        let path = dir.join("train_wkt_v4.csv");
        let mut file = File::create(&path).unwrap();
        write!(file, "{HEADER}{rows}").unwrap();
        path
    }

    #[test]
    fn parses_square_exterior_ring() {
        let dir = tempdir().unwrap();
        let path = write_table(
            dir.path(),
            "S1,1,\"MULTIPOLYGON(((0 0,0 1,1 1,1 0,0 0)))\"\n",
        );

        let polygons = load_label_table(&path, "S1").unwrap();
        assert_eq!(polygons.len(), 1);

        let multi = &polygons[&1];
        assert_eq!(multi.0.len(), 1);
        let ring: Vec<(f64, f64)> = multi.0[0]
            .exterior()
            .0
            .iter()
            .map(|c| (c.x, c.y))
            .collect();
        assert_eq!(
            ring,
            vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]
        );
    }

    #[test]
    fn absent_scene_yields_empty_set() {
        let dir = tempdir().unwrap();
        let path = write_table(
            dir.path(),
            "S1,1,\"MULTIPOLYGON(((0 0,0 1,1 1,1 0,0 0)))\"\n",
        );

        let polygons = load_label_table(&path, "S2").unwrap();
        assert!(polygons.is_empty());
    }

    #[test]
    fn first_row_per_class_wins() {
        let dir = tempdir().unwrap();
        let path = write_table(
            dir.path(),
            concat!(
                "S1,1,\"MULTIPOLYGON(((0 0,0 1,1 1,1 0,0 0)))\"\n",
                "S1,1,\"MULTIPOLYGON(((0 0,0 2,2 2,2 0,0 0)))\"\n",
            ),
        );

        let polygons = load_label_table(&path, "S1").unwrap();
        let ring = &polygons[&1].0[0].exterior().0;
        assert_eq!(ring[2].x, 1.0, "second row must not replace the first");
    }

    #[test]
    fn empty_multipolygon_parses_to_no_polygons() {
        let dir = tempdir().unwrap();
        let path = write_table(dir.path(), "S1,4,MULTIPOLYGON EMPTY\n");

        let polygons = load_label_table(&path, "S1").unwrap();
        assert!(polygons[&4].0.is_empty());
    }

    #[test]
    fn malformed_wkt_is_an_error() {
        let dir = tempdir().unwrap();
        let path = write_table(dir.path(), "S1,2,\"MULTIPOLYGON(((0 0,banana)))\"\n");

        match load_label_table(&path, "S1") {
            Err(SceneError::Wkt { class: 2, .. }) => {}
            other => panic!("expected Wkt error, got {other:?}"),
        }
    }

    #[test]
    fn decodes_gray16_tiff() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tile.tif");
        let samples: Vec<u16> = (0..6).map(|v| v * 1000).collect();
        {
            let file = File::create(&path).unwrap();
            let mut encoder = TiffEncoder::new(file).unwrap();
            encoder
                .write_image::<colortype::Gray16>(3, 2, &samples)
                .unwrap();
        }

        let raster = read_raster(&path).unwrap();
        assert_eq!((raster.height(), raster.width(), raster.channels()), (2, 3, 1));
        assert_eq!(raster.data[[0, 0, 0]], 0);
        assert_eq!(raster.data[[1, 2, 0]], 5000);
    }

    #[test]
    fn decodes_rgb16_tiff() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tile.tif");
        let samples: Vec<u16> = (0..12).collect();
        {
            let file = File::create(&path).unwrap();
            let mut encoder = TiffEncoder::new(file).unwrap();
            encoder
                .write_image::<colortype::RGB16>(2, 2, &samples)
                .unwrap();
        }

        let raster = read_raster(&path).unwrap();
        assert_eq!((raster.height(), raster.width(), raster.channels()), (2, 2, 3));
        assert_eq!(raster.data[[1, 1, 2]], 11);
    }
}
