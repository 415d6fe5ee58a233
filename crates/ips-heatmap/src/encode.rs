//! Grid → raster image.
//!
//! One pixel per cell, coloured by [`intensity_color`], row-major with the
//! origin at the top-left (pixel `(x, y)` is cell `(x, y)`).
//!
//! [`save`] encodes into memory, writes a temporary sibling file and renames
//! it over the target, so a failed encode or write never leaves a truncated
//! image behind.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use tracing::info;

use crate::{intensity_color, GridView, HeatmapError, HeatmapResult};

/// Raster formats the encoder writes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    Bmp,
    /// Binary PPM (`P6`).
    Ppm,
}

impl RasterFormat {
    /// Infer from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> HeatmapResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(RasterFormat::Png),
            "bmp" => Ok(RasterFormat::Bmp),
            "ppm" => Ok(RasterFormat::Ppm),
            _ => Err(HeatmapError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            RasterFormat::Png => ImageFormat::Png,
            RasterFormat::Bmp => ImageFormat::Bmp,
            RasterFormat::Ppm => ImageFormat::Pnm,
        }
    }
}

/// Render a grid to an in-memory RGB image.
pub fn encode(view: &GridView<'_>) -> RgbImage {
    RgbImage::from_fn(view.width(), view.height(), |x, y| {
        intensity_color(view.get(x, y) as u64).into()
    })
}

/// Render and serialise to bytes, e.g. for a dashboard asset.
pub fn encode_to_vec(view: &GridView<'_>, format: RasterFormat) -> HeatmapResult<Vec<u8>> {
    let img = encode(view);
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format.image_format())?;
    Ok(buf.into_inner())
}

/// Render and write to `path`; the format follows the extension.
pub fn save(view: &GridView<'_>, path: &Path) -> HeatmapResult<()> {
    let format = RasterFormat::from_path(path)?;
    let bytes = encode_to_vec(view, format)?;

    let tmp = temp_path(path);
    if let Err(e) = fs::write(&tmp, &bytes).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    info!(
        path = %path.display(),
        width = view.width(),
        height = view.height(),
        "heatmap written"
    );
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
