//! Photo import: decode JPEG/PNG bytes and honour EXIF orientation.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{CodecError, Photo};

/// Decode an imported photo into RGB pixels.
///
/// The format is sniffed from the bytes. If the file carries an EXIF
/// orientation tag the pixels are rotated/flipped so the photo is upright.
///
/// # Errors
///
/// Returns `CodecError::UnsupportedFormat` if the format can't be recognised,
/// `CodecError::Corrupted` if decoding fails and `CodecError::EmptyImage` for
/// zero-sized images.
pub fn decode_image(bytes: &[u8]) -> Result<Photo, CodecError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CodecError::Corrupted(e.to_string()))?;

    if reader.format().is_none() {
        return Err(CodecError::UnsupportedFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| CodecError::Corrupted(e.to_string()))?;

    let upright = orient(img, read_orientation(bytes));
    let photo = Photo::from_rgb_image(upright.into_rgb8());
    if photo.is_empty() {
        return Err(CodecError::EmptyImage);
    }

    tracing::debug!(width = photo.width, height = photo.height, "decoded photo");
    Ok(photo)
}

/// EXIF orientation tag (1-8), or 1 when absent or unreadable.
fn read_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .unwrap_or(1)
}

/// Apply an EXIF orientation value. Unknown values leave the image as is.
fn orient(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}
