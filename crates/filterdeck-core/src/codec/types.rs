//! Core types shared by import, rendering and export.

use image::RgbImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::ImageExtent;

/// Error types for image import and export.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The bytes are not in a format we can read.
    #[error("Invalid or unsupported image format")]
    UnsupportedFormat,

    /// The file was recognised but could not be decoded.
    #[error("Corrupted or incomplete image file: {0}")]
    Corrupted(String),

    /// Decoding produced an image with no pixels.
    #[error("Image has no pixels")]
    EmptyImage,

    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder rejected the image.
    #[error("Encoding failed: {0}")]
    Encoding(String),
}

/// Output format for saved images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Jpeg,
    Png,
}

impl ExportFormat {
    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Png => "png",
        }
    }
}

/// Settings used when persisting a rendered image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub format: ExportFormat,
    /// JPEG quality (1-100). Ignored for PNG.
    pub quality: u8,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: ExportFormat::Jpeg,
            quality: 90,
        }
    }
}

/// An RGB photo held in memory.
///
/// Used for the imported source, for render output and for what the sink
/// displays and saves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGB pixel data (3 bytes per pixel, row-major order).
    pub pixels: Vec<u8>,
}

impl Photo {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A photo filled with a single colour.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self::new(width, height, pixels)
    }

    pub fn from_rgb_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Borrow the pixels as an `image` buffer.
    ///
    /// Returns `None` if the pixel buffer doesn't match the dimensions.
    pub fn to_rgb_image(&self) -> Option<RgbImage> {
        RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    pub fn extent(&self) -> ImageExtent {
        ImageExtent::new(self.width, self.height)
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Check that the buffer length matches `width * height * 3`.
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.width == 0 || self.height == 0 {
            return Err(CodecError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let expected = self.pixel_count() * 3;
        if self.pixels.len() != expected {
            return Err(CodecError::InvalidPixelData {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// RGB value at `(x, y)`. Caller guarantees the coordinate is in bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_filled() {
        let photo = Photo::filled(4, 2, [10, 20, 30]);
        assert_eq!(photo.pixels.len(), 24);
        assert_eq!(photo.pixel(3, 1), [10, 20, 30]);
        assert_eq!(photo.extent(), ImageExtent::new(4, 2));
        assert!(!photo.is_empty());
    }

    #[test]
    fn test_photo_validate() {
        assert!(Photo::filled(3, 3, [0, 0, 0]).validate().is_ok());
        assert!(matches!(
            Photo::new(0, 5, vec![]).validate(),
            Err(CodecError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Photo::new(2, 2, vec![0; 11]).validate(),
            Err(CodecError::InvalidPixelData {
                expected: 12,
                actual: 11
            })
        ));
    }

    #[test]
    fn test_rgb_image_conversion() {
        let photo = Photo::filled(5, 3, [1, 2, 3]);
        let img = photo.to_rgb_image().unwrap();
        assert_eq!(img.dimensions(), (5, 3));
        assert_eq!(Photo::from_rgb_image(img), photo);

        let broken = Photo::new(5, 3, vec![0; 4]);
        assert!(broken.to_rgb_image().is_none());
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Jpeg.extension(), "jpg");
        assert_eq!(ExportFormat::Png.extension(), "png");
        assert_eq!(ExportSettings::default().quality, 90);
    }

    #[test]
    fn test_codec_error_display() {
        let err = CodecError::Corrupted("truncated".to_string());
        assert_eq!(err.to_string(), "Corrupted or incomplete image file: truncated");

        let err = CodecError::UnsupportedFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
