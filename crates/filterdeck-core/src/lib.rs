//! Filterdeck Core - filter parameter adapter and edit session
//!
//! This crate turns two user controls (intensity and radius, both 0.0 to 1.0)
//! into the parameters a named filter accepts, and drives one editing
//! screen's import → filter → preview → save loop around that mapping.
//!
//! # Module Structure
//!
//! - `params` - Parameter vocabulary, filter specs, controls and extents
//! - `adapter` - The pure control → parameter mapping
//! - `engine` - Engine trait and the bundled CPU engine
//! - `sink` - Display/persistence trait and a directory-backed sink
//! - `codec` - Photo import (JPEG/PNG) and export
//! - `config` - Session defaults loaded from JSON
//! - `session` - Session state machine, background render requests, save

pub mod adapter;
pub mod codec;
pub mod config;
pub mod engine;
pub mod params;
pub mod session;
pub mod sink;

pub use adapter::{compute_parameters, MAX_RADIUS, MAX_SCALE};
pub use codec::{decode_image, encode_image, CodecError, ExportFormat, ExportSettings, Photo};
pub use config::{ConfigError, EditorConfig};
pub use engine::{BuiltinFilter, CpuEngine, ImageEngine, RenderError};
pub use params::{
    ControlState, FilterSpec, ImageExtent, ParameterMap, ParameterName, ParameterSet,
    ParameterValue,
};
pub use session::{
    CompletedRender, EditEvent, EditSession, RenderOutcome, RenderRequest, SaveReport,
    SessionError, SessionState,
};
pub use sink::{DirectorySink, ImageSink, PersistError};
