//! Image import and export.
//!
//! This module provides functionality for:
//! - Decoding imported JPEG/PNG photos, with EXIF orientation applied
//! - Encoding rendered photos to JPEG or PNG for saving
//!
//! All operations are synchronous and allocate a fresh buffer per call.

mod decode;
mod encode;
mod types;

pub use decode::decode_image;
pub use encode::encode_image;
pub use types::{CodecError, ExportFormat, ExportSettings, Photo};
