//! Edit session WASM bindings.
//!
//! Wraps the core `EditSession` with the CPU engine and an in-memory sink,
//! so a web UI can drive import → filter → preview → save.
//!
//! # Example
//!
//! ```typescript
//! import { JsEditSession } from '@filterdeck/wasm';
//!
//! const session = new JsEditSession({ default_filter: 'vignette' });
//! session.load_image(new Uint8Array(await file.arrayBuffer()));
//! session.set_intensity(0.8);
//!
//! const photo = session.displayed();
//! const jpeg = session.save(); // Uint8Array, ready for download
//! ```

use filterdeck_core::{
    encode_image, CpuEngine, EditSession, EditorConfig, ExportSettings, ImageSink, PersistError,
    Photo, RenderOutcome, SaveReport,
};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

use crate::types::JsPhoto;

/// Sink that keeps the last saved photo as encoded bytes for JavaScript.
#[derive(Debug)]
pub(crate) struct BufferSink {
    export: ExportSettings,
    saved: Option<Vec<u8>>,
}

impl BufferSink {
    pub(crate) fn new(export: ExportSettings) -> Self {
        Self {
            export,
            saved: None,
        }
    }

    pub(crate) fn take_saved(&mut self) -> Option<Vec<u8>> {
        self.saved.take()
    }
}

impl ImageSink for BufferSink {
    fn display(&mut self, photo: &Photo) {
        // The page reads the displayed photo back through `displayed()`
        tracing::trace!(width = photo.width, height = photo.height, "display");
    }

    fn persist(&mut self, photo: &Photo) -> Result<(), PersistError> {
        self.saved = Some(encode_image(photo, self.export)?);
        Ok(())
    }
}

/// Short label for a render outcome, returned to JavaScript.
pub(crate) fn outcome_label(outcome: &RenderOutcome) -> String {
    match outcome {
        RenderOutcome::Rendered => "rendered".to_string(),
        RenderOutcome::NoSourceImage => "no_source_image".to_string(),
        RenderOutcome::Failed(err) => format!("failed: {}", err),
        RenderOutcome::Superseded => "superseded".to_string(),
    }
}

/// One editing screen's session for JavaScript.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession<CpuEngine, BufferSink>,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Create a session. `config` may be `undefined` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsEditSession, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };
        Self::from_config(&config).map_err(|e| JsValue::from_str(&e))
    }

    /// Filter names for the picker menu.
    pub fn filters(&self) -> js_sys::Array {
        self.inner
            .filters()
            .into_iter()
            .map(JsValue::from)
            .collect()
    }

    /// Name of the active filter
    #[wasm_bindgen(getter)]
    pub fn filter(&self) -> String {
        self.inner.filter().to_string()
    }

    /// Intensity control (0-1)
    #[wasm_bindgen(getter)]
    pub fn intensity(&self) -> f32 {
        self.inner.controls().intensity
    }

    /// Radius control (0-1)
    #[wasm_bindgen(getter)]
    pub fn radius(&self) -> f32 {
        self.inner.controls().radius
    }

    /// Whether a photo has been loaded
    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.source().is_some()
    }

    /// Decode and load a JPEG/PNG photo, then render it.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<String, JsValue> {
        self.inner
            .import(bytes)
            .map(|outcome| outcome_label(&outcome))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Load an already decoded photo, then render it.
    pub fn load_photo(&mut self, photo: &JsPhoto) -> Result<String, JsValue> {
        self.inner
            .load_image(photo.to_photo())
            .map(|outcome| outcome_label(&outcome))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Pick a filter by name and re-render.
    pub fn select_filter(&mut self, name: &str) -> Result<String, JsValue> {
        self.inner
            .select_filter(name)
            .map(|outcome| outcome_label(&outcome))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Move the intensity slider and re-render.
    pub fn set_intensity(&mut self, value: f32) -> String {
        outcome_label(&self.inner.set_intensity(value))
    }

    /// Move the radius slider and re-render.
    pub fn set_radius(&mut self, value: f32) -> String {
        outcome_label(&self.inner.set_radius(value))
    }

    /// Parameters the active filter receives as a plain object, or `null`
    /// with no photo loaded.
    pub fn parameters(&self) -> Result<JsValue, JsValue> {
        self.inner
            .parameters()
            .serialize(&Serializer::json_compatible())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// The photo currently on display, if any.
    pub fn displayed(&self) -> Option<JsPhoto> {
        self.inner.displayed().map(JsPhoto::from_photo)
    }

    /// Save the displayed photo and return its encoded bytes.
    ///
    /// On failure the error is the message for a "Save error" dialog.
    pub fn save(&mut self) -> Result<Vec<u8>, JsValue> {
        self.save_bytes().map_err(|report| JsValue::from_str(&report.message))
    }
}

impl JsEditSession {
    pub(crate) fn from_config(config: &EditorConfig) -> Result<Self, String> {
        EditSession::with_export(CpuEngine::new(), config, BufferSink::new)
            .map(|inner| Self { inner })
            .map_err(|e| e.to_string())
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> &mut EditSession<CpuEngine, BufferSink> {
        &mut self.inner
    }

    pub(crate) fn save_bytes(&mut self) -> Result<Vec<u8>, SaveReport> {
        match self.inner.save() {
            Ok(_) => self.inner.sink_mut().take_saved().ok_or_else(|| SaveReport {
                title: "Save error",
                message: "Nothing was written".to_string(),
            }),
            Err(err) => Err(SaveReport::failed(&err)),
        }
    }
}

/// Tests for session bindings.
///
/// Methods returning `Result<T, JsValue>` only work on wasm32 targets, so
/// these tests go through the crate-internal helpers.
#[cfg(test)]
mod tests {
    use super::*;
    use filterdeck_core::{ExportFormat, RenderError};

    fn session() -> JsEditSession {
        JsEditSession::from_config(&EditorConfig::default()).unwrap()
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(outcome_label(&RenderOutcome::Rendered), "rendered");
        assert_eq!(outcome_label(&RenderOutcome::NoSourceImage), "no_source_image");
        assert_eq!(outcome_label(&RenderOutcome::Superseded), "superseded");
        assert_eq!(
            outcome_label(&RenderOutcome::Failed(RenderError::UnknownFilter("x".to_string()))),
            "failed: Unknown filter: x"
        );
    }

    #[test]
    fn test_defaults() {
        let s = session();
        assert_eq!(s.filter(), "sepia_tone");
        assert_eq!(s.intensity(), 0.5);
        assert_eq!(s.radius(), 0.5);
        assert!(!s.has_image());
        assert!(s.displayed().is_none());
    }

    #[test]
    fn test_invalid_config() {
        let config = EditorConfig {
            default_filter: "CIVignette".to_string(),
            ..Default::default()
        };
        let err = JsEditSession::from_config(&config).err().unwrap();
        assert_eq!(err, "Unknown default filter: CIVignette");
    }

    #[test]
    fn test_sliders_before_import() {
        let mut s = session();
        assert_eq!(s.set_intensity(0.2), "no_source_image");
        assert_eq!(s.set_radius(0.9), "no_source_image");
        assert_eq!(s.intensity(), 0.2);
        assert_eq!(s.radius(), 0.9);
    }

    #[test]
    fn test_save_without_image() {
        let mut s = session();
        let report = s.save_bytes().unwrap_err();
        assert_eq!(report.title, "Save error");
        assert_eq!(report.message, "No image loaded");
    }

    #[test]
    fn test_render_and_save_png() {
        let config = EditorConfig {
            export: ExportSettings {
                format: ExportFormat::Png,
                quality: 90,
            },
            ..Default::default()
        };
        let mut s = JsEditSession::from_config(&config).unwrap();
        s.session_mut()
            .load_image(Photo::filled(8, 8, [100, 100, 100]))
            .unwrap();

        assert!(s.has_image());
        assert_eq!(s.set_intensity(1.0), "rendered");
        let shown = s.displayed().unwrap();
        assert_eq!((shown.width(), shown.height()), (8, 8));

        let bytes = s.save_bytes().unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn test_buffer_sink_take() {
        let mut sink = BufferSink::new(ExportSettings::default());
        assert!(sink.take_saved().is_none());
        sink.persist(&Photo::filled(2, 2, [0, 0, 0])).unwrap();
        assert!(sink.take_saved().is_some());
        assert!(sink.take_saved().is_none());
    }
}
