/// Data layer: core types, loading, and the per-scene view.
///
/// Architecture:
/// ```text
///  three_band/*.tif   sixteen_band/*.tif   train_wkt_v4.csv
///         │                  │                    │
///         └──────────────────┴────────────────────┘
///                            ▼
///                      ┌──────────┐
///                      │  loader   │  decode TIFF / parse CSV+WKT
///                      └──────────┘
///                            │
///                            ▼
///                      ┌─────────────┐
///                      │ SceneViewer  │  path resolution, label cache
///                      └─────────────┘
/// ```
pub mod loader;
pub mod model;
pub mod scene;
