//! The bundled filter catalog.

use crate::params::{FilterSpec, ParameterName, ParameterSet};

const INTENSITY: ParameterName = ParameterName::Intensity;
const RADIUS: ParameterName = ParameterName::Radius;
const SCALE: ParameterName = ParameterName::Scale;
const CENTER: ParameterName = ParameterName::Center;

/// Filters the CPU engine knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFilter {
    /// Magnifying bump around a center point.
    BumpDistortion,
    /// Gaussian blur.
    GaussianBlur,
    /// Square pixel blocks anchored on a center point.
    Pixellate,
    /// Brown tone mapping blended by intensity.
    SepiaTone,
    /// Rotational swirl around a center point.
    TwirlDistortion,
    /// Sharpening by subtracting a blurred copy.
    UnsharpMask,
    /// Darkened edges around a center point.
    Vignette,
}

impl BuiltinFilter {
    /// All filters in menu order.
    pub const ALL: [BuiltinFilter; 7] = [
        BuiltinFilter::BumpDistortion,
        BuiltinFilter::GaussianBlur,
        BuiltinFilter::Pixellate,
        BuiltinFilter::SepiaTone,
        BuiltinFilter::TwirlDistortion,
        BuiltinFilter::UnsharpMask,
        BuiltinFilter::Vignette,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BuiltinFilter::BumpDistortion => "bump_distortion",
            BuiltinFilter::GaussianBlur => "gaussian_blur",
            BuiltinFilter::Pixellate => "pixellate",
            BuiltinFilter::SepiaTone => "sepia_tone",
            BuiltinFilter::TwirlDistortion => "twirl_distortion",
            BuiltinFilter::UnsharpMask => "unsharp_mask",
            BuiltinFilter::Vignette => "vignette",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Vocabulary parameters this filter reads.
    pub const fn accepts(self) -> ParameterSet {
        let none = ParameterSet::EMPTY;
        match self {
            BuiltinFilter::BumpDistortion => none.with(CENTER).with(RADIUS).with(SCALE),
            BuiltinFilter::GaussianBlur => none.with(RADIUS),
            BuiltinFilter::Pixellate => none.with(CENTER).with(SCALE),
            BuiltinFilter::SepiaTone => none.with(INTENSITY),
            BuiltinFilter::TwirlDistortion => none.with(CENTER).with(RADIUS),
            BuiltinFilter::UnsharpMask => none.with(INTENSITY).with(RADIUS),
            BuiltinFilter::Vignette => none.with(INTENSITY).with(RADIUS).with(CENTER),
        }
    }

    pub fn spec(self) -> FilterSpec {
        FilterSpec::new(self.name(), self.accepts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for filter in BuiltinFilter::ALL {
            assert_eq!(BuiltinFilter::from_name(filter.name()), Some(filter));
        }
        assert_eq!(BuiltinFilter::from_name("CISepiaTone"), None);
    }

    #[test]
    fn test_accepted_sets() {
        assert_eq!(
            BuiltinFilter::GaussianBlur.accepts(),
            ParameterSet::EMPTY.with(RADIUS)
        );
        assert_eq!(
            BuiltinFilter::SepiaTone.accepts(),
            ParameterSet::EMPTY.with(INTENSITY)
        );
        assert!(BuiltinFilter::Pixellate.accepts().contains(SCALE));
        assert!(!BuiltinFilter::Pixellate.accepts().contains(RADIUS));
        assert_eq!(BuiltinFilter::Vignette.accepts().len(), 3);
    }

    #[test]
    fn test_every_filter_accepts_something() {
        for filter in BuiltinFilter::ALL {
            assert!(!filter.accepts().is_empty(), "{} accepts nothing", filter.name());
        }
    }
}
