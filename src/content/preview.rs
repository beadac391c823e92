//! Image previews: intrinsic dimensions and a tiny blur placeholder.

use crate::constants::{
    DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH, PLACEHOLDER_EDGE, PLACEHOLDER_MIN_DIMENSION,
};
use crate::model::ImageSize;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use imagesize::ImageError;
use std::io::Cursor;
use std::time::Duration;
use thiserror::Error;

/// Why an image could not be enriched. Never escapes normalization.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("download failed: {0}")]
    Download(String),
    #[error("download timed out after {0:?}")]
    Timeout(Duration),
    #[error("unsupported image format")]
    Unsupported,
    #[error("failed to inspect image: {0}")]
    Probe(String),
    #[error("failed to render placeholder: {0}")]
    Render(String),
    #[error("image worker failed: {0}")]
    Worker(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImagePreview {
    pub size: ImageSize,
    pub placeholder: Option<String>,
}

/// Derives the preview for downloaded image bytes.
///
/// A zero dimension in the header falls back to the default for that axis.
/// Only images larger than the minimum on both axes get a placeholder; a
/// placeholder that cannot be rendered is dropped and the probed size kept.
pub fn derive_preview(bytes: &[u8]) -> Result<ImagePreview, PreviewError> {
    let probed = match imagesize::blob_size(bytes) {
        Ok(size) => size,
        Err(ImageError::NotSupported) => return Err(PreviewError::Unsupported),
        Err(ImageError::CorruptedImage) => {
            return Err(PreviewError::Probe("corrupted image".to_string()))
        }
        Err(ImageError::IoError(err)) => return Err(PreviewError::Probe(err.to_string())),
    };

    let size = ImageSize {
        width: axis(probed.width, DEFAULT_IMAGE_WIDTH),
        height: axis(probed.height, DEFAULT_IMAGE_HEIGHT),
    };

    let placeholder = if size.width > PLACEHOLDER_MIN_DIMENSION
        && size.height > PLACEHOLDER_MIN_DIMENSION
    {
        render_placeholder(bytes)
            .map_err(|err| {
                log::warn!(
                    "No placeholder for {}x{} image: {}",
                    size.width,
                    size.height,
                    err
                )
            })
            .ok()
    } else {
        None
    };

    Ok(ImagePreview { size, placeholder })
}

fn axis(probed: usize, fallback: u32) -> u32 {
    u32::try_from(probed)
        .ok()
        .filter(|v| *v > 0)
        .unwrap_or(fallback)
}

/// Encodes a thumbnail (long edge at most `PLACEHOLDER_EDGE`) as a PNG data URL.
fn render_placeholder(bytes: &[u8]) -> Result<String, PreviewError> {
    let image = image::load_from_memory(bytes).map_err(|e| PreviewError::Render(e.to_string()))?;
    let thumbnail = image.thumbnail(PLACEHOLDER_EDGE, PLACEHOLDER_EDGE);

    let mut encoded = Cursor::new(Vec::new());
    thumbnail
        .write_to(&mut encoded, image::ImageFormat::Png)
        .map_err(|e| PreviewError::Render(e.to_string()))?;

    Ok(format!(
        "data:image/png;base64,{}",
        STANDARD.encode(encoded.into_inner())
    ))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    /// PNG bytes of a solid image with the given size.
    pub(crate) fn png(width: u32, height: u32) -> Vec<u8> {
        let buffer = ImageBuffer::from_pixel(width, height, Rgb([200u8, 40, 90]));
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(buffer)
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn large_images_get_a_png_placeholder() {
        let preview = derive_preview(&png(120, 60)).unwrap();
        assert_eq!(
            preview.size,
            ImageSize {
                width: 120,
                height: 60
            }
        );

        let placeholder = preview.placeholder.unwrap();
        let encoded = placeholder.strip_prefix("data:image/png;base64,").unwrap();
        let thumbnail = image::load_from_memory(&STANDARD.decode(encoded).unwrap()).unwrap();
        assert_eq!((thumbnail.width(), thumbnail.height()), (16, 8));
    }

    #[test]
    fn small_images_get_no_placeholder() {
        let preview = derive_preview(&png(40, 300)).unwrap();
        assert_eq!(preview.size.width, 40);
        assert!(preview.placeholder.is_none());
    }

    /// A little-endian TIFF header declaring the size and nothing else.
    pub(crate) fn tiff_header(width: u16, height: u16) -> Vec<u8> {
        let mut bytes = b"II*\0".to_vec();
        bytes.extend_from_slice(&8u32.to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        for (tag, value) in [(256u16, width), (257u16, height)] {
            bytes.extend_from_slice(&tag.to_le_bytes());
            bytes.extend_from_slice(&3u16.to_le_bytes());
            bytes.extend_from_slice(&1u32.to_le_bytes());
            bytes.extend_from_slice(&value.to_le_bytes());
            bytes.extend_from_slice(&[0, 0]);
        }
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes
    }

    #[test]
    fn probed_size_survives_a_placeholder_failure() {
        let preview = derive_preview(&tiff_header(1200, 900)).unwrap();
        assert_eq!(
            preview.size,
            ImageSize {
                width: 1200,
                height: 900
            }
        );
        assert!(preview.placeholder.is_none());
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(derive_preview(b"definitely not an image").is_err());
    }
}
