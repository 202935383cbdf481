//! Routing from a file (or its bytes) to the matching analyzer.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::color::ColorReport;
use crate::config::ClusterConfig;
use crate::error::{DetectError, Result};
use crate::raster::cluster_raster_colors;
use crate::vector::extract_vector_colors_from_str;

/// Which analyzer an input is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Raster,
    Vector,
    Unsupported,
}

impl InputKind {
    /// Route by extension: `.png` is raster, `.svg` is vector, anything else
    /// (including no extension) is unsupported.
    pub fn from_path(path: &Path) -> Self {
        match extension_of(path).as_deref() {
            Some("png") => InputKind::Raster,
            Some("svg") => InputKind::Vector,
            _ => InputKind::Unsupported,
        }
    }
}

/// Lowercased file extension, if any.
pub(crate) fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Detect the colors of an already converted file with the default
/// clustering configuration.
pub fn detect(path: &Path) -> Result<ColorReport> {
    detect_with(path, &ClusterConfig::default())
}

/// Detect the colors of an already converted file.
///
/// Unsupported extensions are not read and yield an empty report.
pub fn detect_with(path: &Path, config: &ClusterConfig) -> Result<ColorReport> {
    let kind = InputKind::from_path(path);
    if kind == InputKind::Unsupported {
        debug!(path = %path.display(), "unsupported format, nothing to detect");
        return Ok(ColorReport::empty());
    }
    let bytes = fs::read(path).map_err(|e| DetectError::io(path, e))?;
    detect_bytes(&bytes, kind, config)
}

/// Detect the colors of in-memory input of a known kind.
pub fn detect_bytes(bytes: &[u8], kind: InputKind, config: &ClusterConfig) -> Result<ColorReport> {
    match kind {
        InputKind::Raster => {
            let img = image::load_from_memory(bytes).map_err(DetectError::ImageDecode)?;
            cluster_raster_colors(&img.to_rgba8(), config)
        }
        InputKind::Vector => {
            let text = std::str::from_utf8(bytes)?;
            extract_vector_colors_from_str(text)
        }
        InputKind::Unsupported => Ok(ColorReport::empty()),
    }
}
