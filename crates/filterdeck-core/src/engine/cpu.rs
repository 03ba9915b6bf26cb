//! CPU implementation of [`ImageEngine`].

use std::f32::consts::PI;

use super::catalog::BuiltinFilter;
use super::filters;
use super::{ImageEngine, RenderError};
use crate::codec::Photo;
use crate::params::{FilterSpec, ParameterMap, ParameterName, ParameterSet};

/// Engine defaults for parameters the caller did not supply.
mod defaults {
    pub const SEPIA_INTENSITY: f32 = 1.0;
    pub const BLUR_RADIUS: f32 = 10.0;
    pub const PIXELLATE_SCALE: f32 = 8.0;
    pub const BUMP_RADIUS: f32 = 300.0;
    pub const BUMP_SCALE: f32 = 0.5;
    pub const TWIRL_RADIUS: f32 = 300.0;
    pub const UNSHARP_RADIUS: f32 = 2.5;
    pub const UNSHARP_INTENSITY: f32 = 0.5;
    pub const VIGNETTE_INTENSITY: f32 = 1.0;
    pub const VIGNETTE_RADIUS: f32 = 150.0;
    pub const VIGNETTE_FALLOFF: f32 = 0.5;
}

/// Renders the built-in catalog on the CPU.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuEngine;

impl CpuEngine {
    pub fn new() -> Self {
        Self
    }
}

/// Parameter lookup with engine fallbacks.
struct Inputs<'a> {
    params: &'a ParameterMap,
    accepted: ParameterSet,
    source: &'a Photo,
}

impl Inputs<'_> {
    fn scalar(&self, name: ParameterName, default: f32) -> f32 {
        if !self.accepted.contains(name) {
            return default;
        }
        self.params.scalar(name).unwrap_or(default)
    }

    fn center(&self) -> (f32, f32) {
        if !self.accepted.contains(ParameterName::Center) {
            return self.source.extent().center();
        }
        self.params
            .point(ParameterName::Center)
            .unwrap_or_else(|| self.source.extent().center())
    }
}

impl ImageEngine for CpuEngine {
    fn catalog(&self) -> Vec<&str> {
        BuiltinFilter::ALL.iter().map(|f| f.name()).collect()
    }

    fn filter_spec(&self, filter: &str) -> Option<FilterSpec> {
        BuiltinFilter::from_name(filter).map(BuiltinFilter::spec)
    }

    fn render(
        &self,
        filter: &str,
        params: &ParameterMap,
        source: &Photo,
    ) -> Result<Photo, RenderError> {
        let builtin = BuiltinFilter::from_name(filter)
            .ok_or_else(|| RenderError::UnknownFilter(filter.to_string()))?;

        source
            .validate()
            .map_err(|e| RenderError::InvalidSource(e.to_string()))?;

        if let Some((name, _)) = params.iter().find(|(_, value)| !value.is_finite()) {
            return Err(RenderError::InvalidParameter(name));
        }

        let inputs = Inputs {
            params,
            accepted: builtin.accepts(),
            source,
        };

        use self::defaults::*;
        use crate::params::ParameterName::{Intensity, Radius, Scale};

        let output = match builtin {
            BuiltinFilter::BumpDistortion => filters::bump_distortion(
                source,
                inputs.center(),
                inputs.scalar(Radius, BUMP_RADIUS),
                inputs.scalar(Scale, BUMP_SCALE),
            ),
            BuiltinFilter::GaussianBlur => {
                filters::gaussian_blur(source, inputs.scalar(Radius, BLUR_RADIUS))
            }
            BuiltinFilter::Pixellate => filters::pixellate(
                source,
                inputs.center(),
                inputs.scalar(Scale, PIXELLATE_SCALE),
            ),
            BuiltinFilter::SepiaTone => {
                filters::sepia_tone(source, inputs.scalar(Intensity, SEPIA_INTENSITY))
            }
            BuiltinFilter::TwirlDistortion => filters::twirl_distortion(
                source,
                inputs.center(),
                inputs.scalar(Radius, TWIRL_RADIUS),
                PI,
            ),
            BuiltinFilter::UnsharpMask => filters::unsharp_mask(
                source,
                inputs.scalar(Radius, UNSHARP_RADIUS),
                inputs.scalar(Intensity, UNSHARP_INTENSITY),
            ),
            BuiltinFilter::Vignette => filters::vignette(
                source,
                inputs.center(),
                inputs.scalar(Radius, VIGNETTE_RADIUS),
                inputs.scalar(Intensity, VIGNETTE_INTENSITY),
                VIGNETTE_FALLOFF,
            ),
        };

        tracing::trace!(filter, width = output.width, height = output.height, "rendered");
        Ok(output)
    }
}
