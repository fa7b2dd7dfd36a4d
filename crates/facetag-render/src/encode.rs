//! JPEG and Base64 encoding.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use thiserror::Error;

pub const DEFAULT_JPEG_QUALITY: u8 = 75;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("JPEG quality must be 1-100, got {0}")]
    InvalidQuality(u8),
    #[error("JPEG encoding failed: {0}")]
    Jpeg(#[from] image::ImageError),
}

/// Encode an image as JPEG bytes.
pub fn jpeg_bytes(image: &RgbImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    if !(1..=100).contains(&quality) {
        return Err(EncodeError::InvalidQuality(quality));
    }
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality).encode_image(image)?;
    Ok(buffer)
}

/// JPEG-encode an optional image. `None` in gives `None` out; encoding
/// failures are logged and also give `None`.
pub fn convert_to_jpeg(image: Option<&RgbImage>, quality: u8) -> Option<Vec<u8>> {
    let image = image?;
    match jpeg_bytes(image, quality) {
        Ok(bytes) => {
            tracing::debug!(bytes = bytes.len(), quality, "encoded JPEG");
            Some(bytes)
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to convert image to JPEG");
            None
        }
    }
}

/// Standard-alphabet, padded Base64 of optional bytes.
pub fn encode_to_base64(bytes: Option<&[u8]>) -> Option<String> {
    bytes.map(|b| BASE64.encode(b))
}
