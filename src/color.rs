use std::collections::BTreeMap;

use eframe::egui::{Color32, ColorImage};
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Raster;

// ---------------------------------------------------------------------------
// Class colormap: class type → Color32
// ---------------------------------------------------------------------------

/// The scalar a label patch is colored by: ten times its class type.
pub fn class_scalar(class: u32) -> f32 {
    (10 * class) as f32
}

/// Map a normalized scalar in [0, 1] onto a dark-blue → yellow hue ramp.
pub fn scalar_color(t: f32) -> Color32 {
    let hue = 260.0 - 200.0 * t.clamp(0.0, 1.0);
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Maps the class types present in a scene to distinct colors, normalizing
/// their scalars over the range actually present.
#[derive(Debug, Clone)]
pub struct ClassColorMap {
    mapping: BTreeMap<u32, Color32>,
    default_color: Color32,
}

impl ClassColorMap {
    pub fn new(classes: impl IntoIterator<Item = u32>) -> Self {
        let classes: Vec<u32> = classes.into_iter().collect();
        let scalars: Vec<f32> = classes.iter().map(|&c| class_scalar(c)).collect();
        let min = scalars.iter().copied().fold(f32::INFINITY, f32::min);
        let max = scalars.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        let mapping: BTreeMap<u32, Color32> = classes
            .iter()
            .zip(scalars.iter())
            .map(|(&class, &scalar)| {
                let t = if max > min {
                    (scalar - min) / (max - min)
                } else {
                    0.5
                };
                (class, scalar_color(t))
            })
            .collect();

        ClassColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the color for a class type.
    pub fn color_for(&self, class: u32) -> Color32 {
        self.mapping
            .get(&class)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (class label → color) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(class, color)| (class.to_string(), *color))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Raster → displayable image
// ---------------------------------------------------------------------------

/// Robust display bounds: the 2nd and 98th percentile of the samples.
fn percentile_bounds(mut values: Vec<u16>) -> (u16, u16) {
    if values.is_empty() {
        return (0, u16::MAX);
    }
    values.sort_unstable();
    let pick = |q: f64| values[((values.len() - 1) as f64 * q).round() as usize];
    let (lo, hi) = (pick(0.02), pick(0.98));
    if lo == hi {
        // Flat tile; avoid a zero-width range.
        (lo, lo.saturating_add(1))
    } else {
        (lo, hi)
    }
}

fn stretch(value: u16, lo: u16, hi: u16) -> u8 {
    let v = value.clamp(lo, hi);
    (f32::from(v - lo) / f32::from(hi - lo) * 255.0).round() as u8
}

/// Convert a decoded band into an 8-bit image for texture upload, contrast-
/// stretched per channel.
///
/// * `channel: Some(c)` – grayscale view of one channel
/// * `channel: None` with ≥3 channels – composite of the first three
/// * otherwise – grayscale view of channel 0
pub fn raster_to_color_image(raster: &Raster, channel: Option<usize>) -> ColorImage {
    let (width, height) = (raster.width(), raster.height());
    let mut rgb = vec![0u8; width * height * 3];

    let composite = channel.is_none() && raster.channels() >= 3;
    if composite {
        for ch in 0..3 {
            let (lo, hi) = percentile_bounds(raster.channel_values(ch));
            for (i, value) in raster.channel_values(ch).into_iter().enumerate() {
                rgb[i * 3 + ch] = stretch(value, lo, hi);
            }
        }
    } else {
        let ch = channel.unwrap_or(0).min(raster.channels().saturating_sub(1));
        let values = raster.channel_values(ch);
        let (lo, hi) = percentile_bounds(values.clone());
        for (i, value) in values.into_iter().enumerate() {
            let level = stretch(value, lo, hi);
            rgb[i * 3] = level;
            rgb[i * 3 + 1] = level;
            rgb[i * 3 + 2] = level;
        }
    }

    ColorImage::from_rgb([width, height], &rgb)
}
