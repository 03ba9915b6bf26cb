//! WASM-compatible wrapper types for photo data.

use filterdeck_core::Photo;
use wasm_bindgen::prelude::*;

/// An RGB photo wrapper for JavaScript.
///
/// The pixel data lives in WASM memory; `pixels()` copies it out as a
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsPhoto {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsPhoto {
    /// Create a photo from dimensions and RGB pixel data (3 bytes per pixel).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsPhoto {
        JsPhoto {
            width,
            height,
            pixels,
        }
    }

    /// Get the photo width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the photo height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Returns RGBA pixel data with opaque alpha, ready for `ImageData`.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for chunk in self.pixels.chunks_exact(3) {
            out.extend_from_slice(chunk);
            out.push(255);
        }
        out
    }
}

impl JsPhoto {
    pub(crate) fn from_photo(photo: &Photo) -> Self {
        Self {
            width: photo.width,
            height: photo.height,
            pixels: photo.pixels.clone(),
        }
    }

    pub(crate) fn to_photo(&self) -> Photo {
        Photo::new(self.width, self.height, self.pixels.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_photo_creation() {
        let photo = JsPhoto::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(photo.width(), 100);
        assert_eq!(photo.height(), 50);
        assert_eq!(photo.byte_length(), 15000);
    }

    #[test]
    fn test_rgba_pixels() {
        let photo = JsPhoto::new(2, 1, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(photo.rgba_pixels(), vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_photo_conversion() {
        let core = Photo::filled(3, 2, [9, 8, 7]);
        let js = JsPhoto::from_photo(&core);
        assert_eq!(js.width(), 3);
        assert_eq!(js.to_photo(), core);
    }
}
