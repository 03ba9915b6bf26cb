//! Display and persistence sink.
//!
//! The session forwards every successful render to [`ImageSink::display`]
//! and hands the displayed photo to [`ImageSink::persist`] on save.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::codec::{encode_image, CodecError, ExportSettings, Photo};

/// Errors that can occur while saving a photo.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The photo could not be encoded.
    #[error("Could not encode image: {0}")]
    Encode(#[from] CodecError),

    /// Writing to storage failed.
    #[error("Could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The storage backend refused the photo.
    #[error("{0}")]
    Rejected(String),
}

/// Receives rendered photos for display and saving.
pub trait ImageSink {
    /// Show a freshly rendered photo.
    fn display(&mut self, photo: &Photo);

    /// Durably store a photo.
    fn persist(&mut self, photo: &Photo) -> Result<(), PersistError>;
}

/// Saves photos as numbered files in a directory.
///
/// There is no screen attached, so `display` only records the last shown
/// dimensions.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    settings: ExportSettings,
    last_displayed: Option<(u32, u32)>,
    saved: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>, settings: ExportSettings) -> Self {
        Self {
            dir: dir.into(),
            settings,
            last_displayed: None,
            saved: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Dimensions of the most recently displayed photo.
    pub fn last_displayed(&self) -> Option<(u32, u32)> {
        self.last_displayed
    }

    /// Paths written so far, oldest first.
    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }

    /// Create the next free `filterdeck-NNNN.<ext>` file.
    ///
    /// Uses `create_new` so an existing photo is never overwritten.
    fn create_next(&self) -> Result<(PathBuf, std::fs::File), PersistError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| PersistError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let ext = self.settings.format.extension();
        let mut index = self.saved.len() + 1;
        loop {
            let path = self.dir.join(format!("filterdeck-{:04}.{}", index, ext));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => index += 1,
                Err(source) => return Err(PersistError::Io { path, source }),
            }
        }
    }
}

impl ImageSink for DirectorySink {
    fn display(&mut self, photo: &Photo) {
        tracing::trace!(width = photo.width, height = photo.height, "display");
        self.last_displayed = Some((photo.width, photo.height));
    }

    fn persist(&mut self, photo: &Photo) -> Result<(), PersistError> {
        let bytes = encode_image(photo, self.settings)?;
        let (path, mut file) = self.create_next()?;

        if let Err(source) = file.write_all(&bytes).and_then(|_| file.sync_all()) {
            // Don't leave a truncated photo behind
            let _ = std::fs::remove_file(&path);
            return Err(PersistError::Io { path, source });
        }

        tracing::info!(path = %path.display(), bytes = bytes.len(), "saved photo");
        self.saved.push(path);
        Ok(())
    }
}
