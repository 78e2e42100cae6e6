use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use geo_types::MultiPolygon;
use ndarray::Array3;
use thiserror::Error;

// ---------------------------------------------------------------------------
// SceneError – everything that can go wrong while loading scene data
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("band type '{0}' should be one of RGB, A, M, P")]
    InvalidBand(String),

    #[error("no such image: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF decoding error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("label table error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid WKT for class {class}: {message}")]
    Wkt { class: u32, message: String },

    #[error("unsupported pixel format in {}", .0.display())]
    UnsupportedPixelFormat(PathBuf),
}

pub type Result<T> = std::result::Result<T, SceneError>;

// ---------------------------------------------------------------------------
// BandType – the four band products a scene can carry
// ---------------------------------------------------------------------------

/// Which band file of a scene to read.
///
/// `Rgb` is the three-band composite; `A`, `M` and `P` are the sixteen-band
/// products (SWIR, multispectral, panchromatic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandType {
    Rgb,
    A,
    M,
    P,
}

impl BandType {
    pub const ALL: [BandType; 4] = [BandType::Rgb, BandType::A, BandType::M, BandType::P];

    /// The band's name as it appears in file names.
    pub fn letter(self) -> &'static str {
        match self {
            BandType::Rgb => "RGB",
            BandType::A => "A",
            BandType::M => "M",
            BandType::P => "P",
        }
    }
}

impl fmt::Display for BandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for BandType {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "RGB" => Ok(BandType::Rgb),
            "A" => Ok(BandType::A),
            "M" => Ok(BandType::M),
            "P" => Ok(BandType::P),
            other => Err(SceneError::InvalidBand(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Raster – decoded pixel data of one band file
// ---------------------------------------------------------------------------

/// A decoded band: 16-bit samples in row-major (height, width, channels)
/// layout. Read-only once decoded.
#[derive(Debug, Clone)]
pub struct Raster {
    pub data: Array3<u16>,
}

impl Raster {
    pub fn new(data: Array3<u16>) -> Self {
        Raster { data }
    }

    pub fn height(&self) -> usize {
        self.data.shape()[0]
    }

    pub fn width(&self) -> usize {
        self.data.shape()[1]
    }

    pub fn channels(&self) -> usize {
        self.data.shape()[2]
    }

    /// Copy out all samples of one channel, row-major.
    pub fn channel_values(&self, channel: usize) -> Vec<u16> {
        self.data
            .index_axis(ndarray::Axis(2), channel)
            .iter()
            .copied()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// PolygonSet – ground-truth labels of one scene
// ---------------------------------------------------------------------------

/// Class-type → multi-polygon geometry, ordered by class for stable legends.
pub type PolygonSet = BTreeMap<u32, MultiPolygon<f64>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_names_round_trip() {
        for band in BandType::ALL {
            assert_eq!(band.letter().parse::<BandType>().unwrap(), band);
        }
    }

    #[test]
    fn unknown_band_name_is_rejected() {
        for bad in ["rgb", "B", "PAN", ""] {
            match bad.parse::<BandType>() {
                Err(SceneError::InvalidBand(name)) => assert_eq!(name, bad),
                other => panic!("expected InvalidBand for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn raster_shape_accessors() {
        let raster = Raster::new(Array3::<u16>::zeros((4, 5, 3)));
        assert_eq!(raster.height(), 4);
        assert_eq!(raster.width(), 5);
        assert_eq!(raster.channels(), 3);
        assert_eq!(raster.channel_values(0).len(), 20);
    }
}
