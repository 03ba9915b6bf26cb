//! Photo export to JPEG or PNG bytes.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{CodecError, ExportFormat, ExportSettings, Photo};

/// Encode a photo for persistence.
///
/// # Arguments
///
/// * `photo` - RGB photo to encode
/// * `settings` - Output format and JPEG quality (clamped to 1-100)
///
/// # Errors
///
/// Returns `CodecError::InvalidDimensions` or `CodecError::InvalidPixelData`
/// for malformed photos, `CodecError::Encoding` if the encoder fails.
pub fn encode_image(photo: &Photo, settings: ExportSettings) -> Result<Vec<u8>, CodecError> {
    photo.validate()?;

    let mut buffer = Cursor::new(Vec::new());
    let result = match settings.format {
        ExportFormat::Jpeg => {
            let quality = settings.quality.clamp(1, 100);
            JpegEncoder::new_with_quality(&mut buffer, quality).write_image(
                &photo.pixels,
                photo.width,
                photo.height,
                ExtendedColorType::Rgb8,
            )
        }
        ExportFormat::Png => PngEncoder::new(&mut buffer).write_image(
            &photo.pixels,
            photo.width,
            photo.height,
            ExtendedColorType::Rgb8,
        ),
    };
    result.map_err(|e| CodecError::Encoding(e.to_string()))?;

    Ok(buffer.into_inner())
}
