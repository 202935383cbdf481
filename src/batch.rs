//! Analysis of an uploaded batch of logo files.
//!
//! Each upload is normalized to a form the analyzers accept, its colors are
//! detected, and a `data:` URI preview is attached. Raster uploads
//! (`png`, `jpg`, `jpeg`) are decoded and re-encoded as RGBA PNG, and that
//! PNG is used as the preview. The alpha channel is kept, so fully
//! transparent pixels never count toward the detected colors. SVG uploads
//! are previewed as-is. Formats that need an external converter produce an
//! empty color list.

use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};
use serde::Serialize;
use tracing::{info, warn};

use crate::color::ColorReport;
use crate::config::ClusterConfig;
use crate::detect::{InputKind, detect_bytes, extension_of};
use crate::error::{DetectError, Result};
use crate::raster::cluster_raster_colors;

/// Upper bound on files accepted in one batch.
pub const MAX_UPLOAD_FILES: usize = 100;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

/// Per-file result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub filename: String,
    pub count: usize,
    pub colors: Vec<String>,
    /// `data:<mime>;base64,...`
    pub preview: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub results: Vec<FileReport>,
}

/// Analyze every upload in order. The first failing file aborts the batch.
pub fn analyze_uploads(files: &[UploadedFile], config: &ClusterConfig) -> Result<BatchReport> {
    if files.is_empty() {
        return Err(DetectError::NoFiles);
    }
    if files.len() > MAX_UPLOAD_FILES {
        return Err(DetectError::TooManyFiles {
            count: files.len(),
            max: MAX_UPLOAD_FILES,
        });
    }
    config.validate()?;

    let results = files
        .iter()
        .map(|file| analyze_upload(file, config))
        .collect::<Result<Vec<_>>>()?;

    info!(files = results.len(), "analyzed upload batch");
    Ok(BatchReport { results })
}

/// Normalize, analyze and preview a single upload.
pub fn analyze_upload(file: &UploadedFile, config: &ClusterConfig) -> Result<FileReport> {
    let (report, preview) = match extension_of(Path::new(&file.filename)).as_deref() {
        Some("png" | "jpg" | "jpeg") => {
            let img = image::load_from_memory(&file.bytes)
                .map_err(DetectError::ImageDecode)?
                .to_rgba8();
            let report = cluster_raster_colors(&img, config)?;
            let png = encode_png(&img)?;
            (report, data_uri("image/png", &png))
        }
        Some("svg") => {
            let report = detect_bytes(&file.bytes, InputKind::Vector, config)?;
            (report, data_uri("image/svg+xml", &file.bytes))
        }
        ext => {
            warn!(filename = %file.filename, ?ext, "no converter for upload format");
            (ColorReport::empty(), data_uri("application/octet-stream", &file.bytes))
        }
    };

    Ok(FileReport {
        filename: file.filename.clone(),
        count: report.count,
        colors: report.colors.into_iter().collect(),
        preview,
    })
}

fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(DetectError::ImageEncode)?;
    Ok(buf)
}

fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
