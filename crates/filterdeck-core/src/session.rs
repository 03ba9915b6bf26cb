//! Edit session for one editing screen.
//!
//! Holds the active filter, the two controls, the loaded source photo and the
//! photo currently on display. Every filter or control change recomputes the
//! parameter map from scratch and renders, but only once a photo is loaded:
//!
//! ```text
//!   NoImage ──import──▶ ImageLoaded ──(filter | intensity | radius)──▶ render
//!      │                     ▲  │
//!      └─ changes stored,    │  └──import──▶ replace source, render
//!         nothing rendered   └──────────────┘
//! ```
//!
//! Rendering can also be driven off-thread: [`EditSession::stage`] returns a
//! [`RenderRequest`] that can run anywhere, and
//! [`EditSession::complete_render`] only accepts the result of the most
//! recent request.

use std::sync::Arc;

use thiserror::Error;

use crate::adapter::compute_parameters;
use crate::codec::{decode_image, CodecError, ExportSettings, Photo};
use crate::config::{ConfigError, EditorConfig};
use crate::engine::{ImageEngine, RenderError};
use crate::params::{clamp_control, ControlState, ParameterMap};
use crate::sink::{ImageSink, PersistError};

/// Errors surfaced to the caller of a session operation.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The operation needs a loaded photo.
    #[error("No image loaded")]
    NoSourceImage,

    /// The engine has no filter with this name.
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    /// The imported photo could not be used.
    #[error("Could not import image: {0}")]
    Import(#[from] CodecError),

    /// The sink failed to save the photo.
    #[error(transparent)]
    Persistence(#[from] PersistError),

    /// Session defaults are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Whether a photo has been loaded yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoImage,
    ImageLoaded,
}

/// What happened to the display after a change.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// A new photo was rendered and displayed.
    Rendered,
    /// No photo is loaded; nothing was rendered.
    NoSourceImage,
    /// The engine failed; the previous display is kept.
    Failed(RenderError),
    /// A newer change was made while this render ran; its result was dropped.
    Superseded,
}

impl RenderOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, RenderOutcome::Rendered)
    }
}

/// A user change to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum EditEvent {
    SelectFilter(String),
    SetIntensity(f32),
    SetRadius(f32),
}

/// A snapshot of everything one render needs.
///
/// `Send`, so it can be evaluated on a worker thread.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    generation: u64,
    filter: String,
    controls: ControlState,
    source: Arc<Photo>,
}

impl RenderRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn controls(&self) -> ControlState {
        self.controls
    }

    /// Query the engine for the filter, build parameters and render.
    pub fn run<E: ImageEngine + ?Sized>(self, engine: &E) -> CompletedRender {
        let output = match engine.filter_spec(&self.filter) {
            Some(spec) => {
                let params = compute_parameters(&spec, self.controls, self.source.extent());
                engine.render(&self.filter, &params, &self.source)
            }
            None => Err(RenderError::UnknownFilter(self.filter.clone())),
        };

        CompletedRender {
            generation: self.generation,
            output,
        }
    }
}

/// The result of a [`RenderRequest`], ready to hand back to the session.
#[derive(Debug)]
pub struct CompletedRender {
    generation: u64,
    output: Result<Photo, RenderError>,
}

impl CompletedRender {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Dialog text for the outcome of a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub title: &'static str,
    pub message: String,
}

impl SaveReport {
    pub fn saved() -> Self {
        Self {
            title: "Saved!",
            message: "Your altered image has been saved to your photos.".to_string(),
        }
    }

    pub fn failed(err: &SessionError) -> Self {
        Self {
            title: "Save error",
            message: err.to_string(),
        }
    }
}

/// Session state for one editing screen.
#[derive(Debug)]
pub struct EditSession<E, S> {
    engine: E,
    sink: S,
    filter: String,
    controls: ControlState,
    source: Option<Arc<Photo>>,
    displayed: Option<Photo>,
    generation: u64,
}

impl<E: ImageEngine, S: ImageSink> EditSession<E, S> {
    /// Create a session whose sink is built from `config.export`.
    pub fn with_export<F>(
        engine: E,
        config: &EditorConfig,
        build_sink: F,
    ) -> Result<Self, SessionError>
    where
        F: FnOnce(ExportSettings) -> S,
    {
        Self::new(engine, build_sink(config.export), config)
    }

    /// Create a session, validating `config` against the engine's catalog.
    ///
    /// `config.export` is not applied here; the sink carries its own export
    /// settings. Use [`EditSession::with_export`] to build the sink from it.
    pub fn new(engine: E, sink: S, config: &EditorConfig) -> Result<Self, SessionError> {
        config.validate_for(&engine)?;
        Ok(Self {
            engine,
            sink,
            filter: config.default_filter.clone(),
            controls: config.initial_controls,
            source: None,
            displayed: None,
            generation: 0,
        })
    }

    pub fn state(&self) -> SessionState {
        if self.source.is_some() {
            SessionState::ImageLoaded
        } else {
            SessionState::NoImage
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Name of the active filter.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn controls(&self) -> ControlState {
        self.controls
    }

    pub fn source(&self) -> Option<&Photo> {
        self.source.as_deref()
    }

    /// The photo on display, if any render has succeeded.
    pub fn displayed(&self) -> Option<&Photo> {
        self.displayed.as_ref()
    }

    /// Filters the user can pick from.
    pub fn filters(&self) -> Vec<&str> {
        self.engine.catalog()
    }

    /// Parameters the next render would use, or `None` without a photo.
    pub fn parameters(&self) -> Option<ParameterMap> {
        let source = self.source.as_ref()?;
        let spec = self.engine.filter_spec(&self.filter)?;
        Some(compute_parameters(&spec, self.controls, source.extent()))
    }

    /// Decode imported bytes and load them as the source photo.
    pub fn import(&mut self, bytes: &[u8]) -> Result<RenderOutcome, SessionError> {
        let photo = decode_image(bytes)?;
        self.load_image(photo)
    }

    /// Load a photo as the source and render it with the current settings.
    pub fn load_image(&mut self, photo: Photo) -> Result<RenderOutcome, SessionError> {
        photo.validate()?;
        tracing::debug!(
            width = photo.width,
            height = photo.height,
            replaced = self.source.is_some(),
            "source image loaded"
        );
        self.source = Some(Arc::new(photo));
        Ok(self.refresh())
    }

    /// Make `name` the active filter and re-render.
    ///
    /// Unknown names are rejected and the selection is left unchanged.
    pub fn select_filter(&mut self, name: &str) -> Result<RenderOutcome, SessionError> {
        self.apply_event(EditEvent::SelectFilter(name.to_string()))?;
        Ok(self.refresh())
    }

    /// Set the intensity control (clamped to 0-1) and re-render.
    pub fn set_intensity(&mut self, value: f32) -> RenderOutcome {
        self.controls.intensity = clamp_control(value);
        self.refresh()
    }

    /// Set the radius control (clamped to 0-1) and re-render.
    pub fn set_radius(&mut self, value: f32) -> RenderOutcome {
        self.controls.radius = clamp_control(value);
        self.refresh()
    }

    /// Render the current settings synchronously.
    pub fn refresh(&mut self) -> RenderOutcome {
        match self.prepare_render() {
            Some(request) => {
                let done = request.run(&self.engine);
                self.complete_render(done)
            }
            None => RenderOutcome::NoSourceImage,
        }
    }

    /// Apply a change and return the render it calls for, without running it.
    ///
    /// Returns `Ok(None)` while no photo is loaded. Any request handed out
    /// earlier becomes stale.
    pub fn stage(&mut self, event: EditEvent) -> Result<Option<RenderRequest>, SessionError> {
        self.apply_event(event)?;
        Ok(self.prepare_render())
    }

    /// Snapshot the current settings into a new render request.
    pub fn prepare_render(&mut self) -> Option<RenderRequest> {
        let Some(source) = self.source.clone() else {
            tracing::debug!(filter = %self.filter, "no source image, skipping render");
            return None;
        };
        self.generation += 1;
        Some(RenderRequest {
            generation: self.generation,
            filter: self.filter.clone(),
            controls: self.controls,
            source,
        })
    }

    /// Accept a finished render if it is still the most recent request.
    pub fn complete_render(&mut self, done: CompletedRender) -> RenderOutcome {
        if done.generation != self.generation {
            tracing::debug!(
                stale = done.generation,
                current = self.generation,
                "discarding superseded render"
            );
            return RenderOutcome::Superseded;
        }

        match done.output {
            Ok(photo) => {
                self.sink.display(&photo);
                self.displayed = Some(photo);
                RenderOutcome::Rendered
            }
            Err(err) => {
                tracing::warn!(filter = %self.filter, error = %err, "render failed, keeping previous image");
                RenderOutcome::Failed(err)
            }
        }
    }

    /// Save the displayed photo through the sink.
    pub fn save(&mut self) -> Result<SaveReport, SessionError> {
        let Some(photo) = self.displayed.as_ref() else {
            return Err(SessionError::NoSourceImage);
        };

        if let Err(err) = self.sink.persist(photo) {
            tracing::warn!(error = %err, "save failed");
            return Err(err.into());
        }
        Ok(SaveReport::saved())
    }

    fn apply_event(&mut self, event: EditEvent) -> Result<(), SessionError> {
        match event {
            EditEvent::SelectFilter(name) => {
                if self.engine.filter_spec(&name).is_none() {
                    return Err(SessionError::UnknownFilter(name));
                }
                tracing::debug!(from = %self.filter, to = %name, "filter selected");
                self.filter = name;
            }
            EditEvent::SetIntensity(value) => self.controls.intensity = clamp_control(value),
            EditEvent::SetRadius(value) => self.controls.radius = clamp_control(value),
        }
        Ok(())
    }
}
