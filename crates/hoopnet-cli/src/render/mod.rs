//! PNG renderers for the assist matrix and the assist graph.
//!
//! Both renderers are pure: they read the analysis results and return an
//! in-memory image. Only [`save_png`] touches the filesystem.

pub mod canvas;
pub mod colormap;
pub mod font;
pub mod heatmap;
pub mod network;

use std::path::Path;

use hoopnet_core::{Error, Result};
use image::{ImageError, ImageFormat, Rgb, RgbImage};
use tracing::debug;

pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
pub const INK: Rgb<u8> = Rgb([20, 20, 20]);

/// Smallest width or height a renderer accepts.
pub const MIN_DIMENSION: u32 = 64;

/// Reject images too small to lay out.
///
/// # Errors
///
/// Returns [`Error::Render`] when either side is below [`MIN_DIMENSION`].
pub fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        return Err(Error::Render(format!(
            "image must be at least {MIN_DIMENSION}x{MIN_DIMENSION} pixels, got {width}x{height}"
        )));
    }
    Ok(())
}

/// Integer font scale: 1 up to 560 px on the short side, +1 per 560 px after.
#[must_use]
pub fn text_scale(width: u32, height: u32) -> u32 {
    (width.min(height) / 560).max(1)
}

/// Encode `img` as PNG at `path`.
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be written, [`Error::Render`] if
/// encoding fails.
pub fn save_png(img: &RgbImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|err| match err {
            ImageError::IoError(source) => Error::io(path, source),
            other => Error::Render(other.to_string()),
        })?;
    debug!(path = %path.display(), "wrote png");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_floor() {
        assert!(check_dimensions(64, 64).is_ok());
        assert!(matches!(check_dimensions(63, 500), Err(Error::Render(_))));
        assert!(matches!(check_dimensions(500, 0), Err(Error::Render(_))));
    }

    #[test]
    fn text_scale_steps() {
        assert_eq!(text_scale(400, 300), 1);
        assert_eq!(text_scale(1440, 1120), 2);
        assert_eq!(text_scale(3000, 1700), 3);
    }

    #[test]
    fn save_png_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.png");
        let img = RgbImage::from_pixel(4, 3, INK);
        save_png(&img, &path).expect("save");
        let bytes = std::fs::read(&path).expect("read");
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn save_png_into_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("out.png");
        let img = RgbImage::from_pixel(4, 3, INK);
        assert!(matches!(save_png(&img, &path), Err(Error::Io { .. })));
    }
}
