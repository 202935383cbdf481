//! Error types for color detection.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for color detection operations
pub type Result<T> = std::result::Result<T, DetectError>;

#[derive(Error, Debug)]
pub enum DetectError {
    /// A caller broke an input contract (zero clusters, bad config values, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to decode image: {0}")]
    ImageDecode(#[source] image::ImageError),

    #[error("PNG encode error: {0}")]
    ImageEncode(#[source] image::ImageError),

    #[error("Unable to parse SVG: {0}")]
    SvgParse(#[from] roxmltree::Error),

    #[error("SVG is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The OS entropy source could not produce a clustering seed
    #[error("Unable to seed clustering: {0}")]
    Entropy(String),

    #[error("No files uploaded")]
    NoFiles,

    #[error("Maximum {max} files allowed, got {count}")]
    TooManyFiles { count: usize, max: usize },
}

impl DetectError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the failure comes from the caller's input rather than from
    /// decoding or I/O.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            DetectError::InvalidInput(_) | DetectError::NoFiles | DetectError::TooManyFiles { .. }
        )
    }
}
