//! Image file loading.

use image::{ImageError, Rgb, RgbImage};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("image file not found: {0}")]
    NotFound(String),
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: ImageError,
    },
    #[error("image has zero dimensions: {0}")]
    ZeroDimensions(String),
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: ImageError,
    },
}

/// Load an image file as 8-bit RGB, whatever its on-disk format.
pub fn load_image_file(path: &Path) -> Result<RgbImage, LoadError> {
    let shown = path.display().to_string();
    if !path.exists() {
        return Err(LoadError::NotFound(shown));
    }

    let image = image::open(path)
        .map_err(|source| LoadError::Decode { path: shown.clone(), source })?
        .into_rgb8();

    if image.width() == 0 || image.height() == 0 {
        return Err(LoadError::ZeroDimensions(shown));
    }

    tracing::debug!(path = %path.display(), width = image.width(), height = image.height(), "loaded image");
    Ok(image)
}

/// Write a blank white `size` × `size` image. The format follows the file extension.
pub fn write_placeholder(path: &Path, size: u32) -> Result<(), LoadError> {
    let image = RgbImage::from_pixel(size, size, Rgb([255, 255, 255]));
    image.save(path).map_err(|source| LoadError::Write {
        path: path.display().to_string(),
        source,
    })
}
