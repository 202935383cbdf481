//! Detect the distinct colors used in a logo.
//!
//! Two analyzers share one result shape, [`ColorReport`]:
//!
//! - [`cluster_raster_colors`] reduces the opaque pixels of a bitmap to at
//!   most K dominant colors with k-means.
//! - [`extract_vector_colors`] walks an SVG tree and collects the paint and
//!   gradient-stop colors of visible elements.
//!
//! [`detect`] picks between them by file extension. Colors are reported as
//! `"white"` or uppercase `#RRGGBB`; named colors pass through lowercased.
//!
//! ```no_run
//! use logo_colors_wasm::detect;
//! use std::path::Path;
//!
//! let report = detect(Path::new("logo.svg"))?;
//! println!("{} colors: {:?}", report.count, report.colors);
//! # Ok::<(), logo_colors_wasm::DetectError>(())
//! ```

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

pub mod batch;
pub mod color;
pub mod config;
pub mod detect;
pub mod error;
pub mod raster;
pub mod vector;

pub use batch::{BatchReport, FileReport, MAX_UPLOAD_FILES, UploadedFile, analyze_upload, analyze_uploads};
pub use color::{ColorReport, ColorSet, WHITE, normalize_color};
pub use config::{ClusterConfig, DEFAULT_MAX_COLORS};
pub use detect::{InputKind, detect, detect_bytes, detect_with};
pub use error::{DetectError, Result};
pub use raster::cluster_raster_colors;
pub use vector::{extract_vector_colors, extract_vector_colors_from_str};

/// Detect the colors of an uploaded file from JavaScript.
///
/// `filename` only selects the analyzer (`.png` or `.svg`); other
/// extensions return no colors. The returned object has the shape
/// `{ count: number, colors: string[] }`.
#[wasm_bindgen(js_name = detectColors)]
pub fn detect_colors(
    input: Vec<u8>,
    filename: String,
    max_colors: usize,
    seed: Option<u64>,
) -> std::result::Result<Object, JsValue> {
    let mut config = ClusterConfig::default().with_max_colors(max_colors);
    config.seed = seed;

    let kind = InputKind::from_path(std::path::Path::new(&filename));
    let report = detect_bytes(&input, kind, &config).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let colors_js = Array::new();
    for color in &report.colors {
        colors_js.push(&JsValue::from_str(color));
    }

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("count"), &JsValue::from(report.count as u32))?;
    Reflect::set(&result, &JsValue::from_str("colors"), &colors_js)?;
    Ok(result)
}
