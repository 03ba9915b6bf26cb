//! Filter parameter adapter.
//!
//! Translates the two user controls into the parameters a filter accepts.
//!
//! ## Rule Table
//! | Parameter   | Value                          |
//! |-------------|--------------------------------|
//! | `intensity` | `controls.intensity`           |
//! | `radius`    | `controls.radius * 200`        |
//! | `scale`     | `controls.intensity * 10`      |
//! | `center`    | `(width / 2, height / 2)`      |
//!
//! Each rule fires only when the filter accepts that name. Filter inputs
//! outside this vocabulary keep the engine's defaults.

use crate::params::{
    ControlState, FilterSpec, ImageExtent, ParameterMap, ParameterName, ParameterValue,
};

/// Radius in pixels at a full radius control.
pub const MAX_RADIUS: f32 = 200.0;

/// Scale factor at a full intensity control.
pub const MAX_SCALE: f32 = 10.0;

/// Build the parameter map for one render.
///
/// Pure function of its inputs: identical inputs always give identical maps,
/// and the map contains a name if and only if `filter` accepts it. Controls
/// are not range-checked here; the session keeps them in 0.0 to 1.0.
///
/// # Arguments
/// * `filter` - Accepted parameter names for the active filter
/// * `controls` - Current intensity and radius controls
/// * `extent` - Dimensions of the loaded source image
pub fn compute_parameters(
    filter: &FilterSpec,
    controls: ControlState,
    extent: ImageExtent,
) -> ParameterMap {
    let mut params = ParameterMap::new();

    if filter.accepts(ParameterName::Intensity) {
        params.insert(
            ParameterName::Intensity,
            ParameterValue::Scalar(controls.intensity),
        );
    }

    if filter.accepts(ParameterName::Radius) {
        params.insert(
            ParameterName::Radius,
            ParameterValue::Scalar(controls.radius * MAX_RADIUS),
        );
    }

    if filter.accepts(ParameterName::Scale) {
        params.insert(
            ParameterName::Scale,
            ParameterValue::Scalar(controls.intensity * MAX_SCALE),
        );
    }

    if filter.accepts(ParameterName::Center) {
        let (x, y) = extent.center();
        params.insert(ParameterName::Center, ParameterValue::Point { x, y });
    }

    params
}


// ============================================================================
// Property-Based Tests
// ============================================================================
