//! Editor configuration.
//!
//! Loaded from JSON; every field is optional and falls back to its default:
//!
//! ```json
//! {
//!   "default_filter": "sepia_tone",
//!   "initial_controls": { "intensity": 0.5, "radius": 0.5 },
//!   "export": { "format": "jpeg", "quality": 90 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::ExportSettings;
use crate::engine::ImageEngine;
use crate::params::ControlState;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON could not be parsed into a config.
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A control default lies outside 0.0 to 1.0.
    #[error("Control '{name}' must be between 0 and 1, got {value}")]
    ControlOutOfRange { name: &'static str, value: f32 },

    /// JPEG quality outside 1 to 100.
    #[error("Export quality must be between 1 and 100, got {0}")]
    QualityOutOfRange(u8),

    /// The default filter is not in the engine's catalog.
    #[error("Unknown default filter: {0}")]
    UnknownFilter(String),
}

/// Defaults for a new editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Filter active before the user picks one.
    pub default_filter: String,
    /// Control values at session start.
    pub initial_controls: ControlState,
    /// How saved photos are encoded.
    pub export: ExportSettings,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_filter: "sepia_tone".to_string(),
            initial_controls: ControlState::default(),
            export: ExportSettings::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let controls = [
            ("intensity", self.initial_controls.intensity),
            ("radius", self.initial_controls.radius),
        ];
        for (name, value) in controls {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ControlOutOfRange { name, value });
            }
        }

        if !(1..=100).contains(&self.export.quality) {
            return Err(ConfigError::QualityOutOfRange(self.export.quality));
        }
        Ok(())
    }

    /// Check that the default filter exists in `engine`'s catalog.
    pub fn validate_for<E: ImageEngine + ?Sized>(&self, engine: &E) -> Result<(), ConfigError> {
        self.validate()?;
        if engine.filter_spec(&self.default_filter).is_none() {
            return Err(ConfigError::UnknownFilter(self.default_filter.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ExportFormat;
    use crate::engine::CpuEngine;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.default_filter, "sepia_tone");
        assert_eq!(config.initial_controls, ControlState::new(0.5, 0.5));
        assert_eq!(config.export.format, ExportFormat::Jpeg);
        assert_eq!(config.export.quality, 90);
        assert!(config.validate_for(&CpuEngine::new()).is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = EditorConfig::from_json(
            r#"{"default_filter": "vignette", "initial_controls": {"radius": 0.1}, "export": {"format": "png"}}"#,
        )
        .unwrap();

        assert_eq!(config.default_filter, "vignette");
        assert_eq!(config.initial_controls.intensity, 0.5);
        assert_eq!(config.initial_controls.radius, 0.1);
        assert_eq!(config.export.format, ExportFormat::Png);
        assert_eq!(config.export.quality, 90);
    }

    #[test]
    fn test_control_out_of_range() {
        let err = EditorConfig::from_json(r#"{"initial_controls": {"intensity": 1.5}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ControlOutOfRange {
                name: "intensity",
                ..
            }
        ));
    }

    #[test]
    fn test_quality_out_of_range() {
        let err = EditorConfig::from_json(r#"{"export": {"quality": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::QualityOutOfRange(0)));
        assert_eq!(err.to_string(), "Export quality must be between 1 and 100, got 0");
    }

    #[test]
    fn test_malformed_json() {
        let err = EditorConfig::from_json(r#"{"export": {"format": "gif"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_default_filter() {
        let config = EditorConfig {
            default_filter: "CISepiaTone".to_string(),
            ..Default::default()
        };
        let err = config.validate_for(&CpuEngine::new()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFilter(name) if name == "CISepiaTone"));
    }
}
