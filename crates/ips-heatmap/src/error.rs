//! Error types for ips-heatmap.

use ips_core::IpsError;
use thiserror::Error;

/// Errors raised while building or rendering a heatmap.
#[derive(Debug, Error)]
pub enum HeatmapError {
    #[error(transparent)]
    Config(#[from] IpsError),

    #[error("unsupported raster format: {0}")]
    UnsupportedFormat(String),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, HeatmapError>`.
pub type HeatmapResult<T> = Result<T, HeatmapError>;
