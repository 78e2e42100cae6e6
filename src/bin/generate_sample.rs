use std::fs;
use std::fs::File;

use tiff::encoder::{colortype, TiffEncoder};

const DATA_DIR: &str = "data";
const SCENE: &str = "6100_1_3";
const SIZE: u32 = 128;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in [lo, hi)
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// One synthetic channel: a diagonal terrain-like gradient plus noise.
fn synth_channel(rng: &mut SimpleRng, width: u32, height: u32, base: f64) -> Vec<u16> {
    let mut samples = Vec::with_capacity((width * height) as usize);
    for row in 0..height {
        for col in 0..width {
            let gradient = (row + col) as f64 / (width + height) as f64;
            let value = base + 20_000.0 * gradient + rng.range(0.0, 2_000.0);
            samples.push(value.min(65_535.0) as u16);
        }
    }
    samples
}

fn write_rgb_band(rng: &mut SimpleRng, path: &str) {
    let r = synth_channel(rng, SIZE, SIZE, 8_000.0);
    let g = synth_channel(rng, SIZE, SIZE, 12_000.0);
    let b = synth_channel(rng, SIZE, SIZE, 6_000.0);

    let mut interleaved = Vec::with_capacity(r.len() * 3);
    for i in 0..r.len() {
        interleaved.push(r[i]);
        interleaved.push(g[i]);
        interleaved.push(b[i]);
    }

    let file = File::create(path).expect("Failed to create RGB tile");
    let mut encoder = TiffEncoder::new(file).expect("Failed to create TIFF encoder");
    encoder
        .write_image::<colortype::RGB16>(SIZE, SIZE, &interleaved)
        .expect("Failed to write RGB tile");
}

fn write_gray_band(rng: &mut SimpleRng, path: &str, base: f64) {
    let samples = synth_channel(rng, SIZE, SIZE, base);
    let file = File::create(path).expect("Failed to create band tile");
    let mut encoder = TiffEncoder::new(file).expect("Failed to create TIFF encoder");
    encoder
        .write_image::<colortype::Gray16>(SIZE, SIZE, &samples)
        .expect("Failed to write band tile");
}

/// A random axis-aligned rectangle as one WKT polygon group, in the unit
/// scene coordinates the label table uses.
fn rect_wkt(rng: &mut SimpleRng) -> String {
    let x = rng.range(0.0, 0.8);
    let y = rng.range(0.0, 0.8);
    let x2 = x + rng.range(0.02, 0.2);
    let y2 = y + rng.range(0.02, 0.2);
    format!("(({x:.4} {y:.4},{x:.4} {y2:.4},{x2:.4} {y2:.4},{x2:.4} {y:.4},{x:.4} {y:.4}))")
}

fn write_label_table(rng: &mut SimpleRng, path: &str) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create label table");
    writer
        .write_record(["ImageId", "ClassType", "MultipolygonWKT"])
        .expect("Failed to write header");

    for class in 1u32..=5 {
        let rects: Vec<String> = (0..1 + class as usize % 3)
            .map(|_| rect_wkt(rng))
            .collect();
        let wkt = format!("MULTIPOLYGON({})", rects.join(","));
        writer
            .write_record([SCENE, &class.to_string(), &wkt])
            .expect("Failed to write label row");
    }

    // One unlabelled class, as the real table has.
    writer
        .write_record([SCENE, "6", "MULTIPOLYGON EMPTY"])
        .expect("Failed to write label row");
    writer.flush().expect("Failed to flush label table");
}

fn main() {
    let mut rng = SimpleRng::new(42);

    fs::create_dir_all(format!("{DATA_DIR}/three_band")).expect("Failed to create three_band");
    fs::create_dir_all(format!("{DATA_DIR}/sixteen_band")).expect("Failed to create sixteen_band");

    write_rgb_band(&mut rng, &format!("{DATA_DIR}/three_band/{SCENE}.tif"));

    // Single-channel stand-ins for the sixteen-band products.
    write_gray_band(&mut rng, &format!("{DATA_DIR}/sixteen_band/{SCENE}_A.tif"), 5_000.0);
    write_gray_band(&mut rng, &format!("{DATA_DIR}/sixteen_band/{SCENE}_M.tif"), 10_000.0);
    write_gray_band(&mut rng, &format!("{DATA_DIR}/sixteen_band/{SCENE}_P.tif"), 15_000.0);

    write_label_table(&mut rng, &format!("{DATA_DIR}/train_wkt_v4.csv"));

    println!("Wrote demo scene {SCENE} ({SIZE}x{SIZE} tiles) to {DATA_DIR}/");
}
