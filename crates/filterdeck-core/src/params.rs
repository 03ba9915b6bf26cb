//! Filter parameter vocabulary and the values that flow into a render.
//!
//! The adapter only ever speaks four parameter names: `intensity`, `radius`,
//! `scale` and `center`. Anything else a filter needs is left to the engine's
//! own defaults.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A parameter name from the fixed adapter vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterName {
    /// Effect strength, passed through from the intensity control.
    Intensity,
    /// Pixel radius, derived from the radius control.
    Radius,
    /// Scale factor, derived from the intensity control.
    Scale,
    /// Effect origin, the midpoint of the source image.
    Center,
}

impl ParameterName {
    /// Every name in the vocabulary, in a stable order.
    pub const ALL: [ParameterName; 4] = [
        ParameterName::Intensity,
        ParameterName::Radius,
        ParameterName::Scale,
        ParameterName::Center,
    ];

    /// The wire name used by engines and bindings.
    pub fn as_str(self) -> &'static str {
        match self {
            ParameterName::Intensity => "intensity",
            ParameterName::Radius => "radius",
            ParameterName::Scale => "scale",
            ParameterName::Center => "center",
        }
    }

    /// Parse a wire name. Returns `None` for names outside the vocabulary.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }

    #[inline]
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The subset of the vocabulary a filter accepts.
///
/// Stored as a bit set so catalog tables can be built in `const` context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParameterSet {
    bits: u8,
}

impl ParameterSet {
    /// A set accepting nothing from the vocabulary.
    pub const EMPTY: ParameterSet = ParameterSet { bits: 0 };

    /// Return a copy of this set with `name` added.
    pub const fn with(self, name: ParameterName) -> Self {
        ParameterSet {
            bits: self.bits | name.bit(),
        }
    }

    /// Add a name to the set.
    pub fn insert(&mut self, name: ParameterName) {
        self.bits |= name.bit();
    }

    /// Whether the set contains `name`.
    pub fn contains(&self, name: ParameterName) -> bool {
        self.bits & name.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterate the accepted names in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = ParameterName> + '_ {
        ParameterName::ALL
            .into_iter()
            .filter(move |name| self.contains(*name))
    }
}

impl FromIterator<ParameterName> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = ParameterName>>(iter: I) -> Self {
        let mut set = ParameterSet::EMPTY;
        for name in iter {
            set.insert(name);
        }
        set
    }
}

/// A filter identified by name, with the parameters it accepts.
///
/// Produced by an [`ImageEngine`](crate::engine::ImageEngine); the adapter
/// only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    name: String,
    accepted: ParameterSet,
}

impl FilterSpec {
    pub fn new(name: impl Into<String>, accepted: ParameterSet) -> Self {
        Self {
            name: name.into(),
            accepted,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accepted(&self) -> ParameterSet {
        self.accepted
    }

    /// Whether the filter declares `name` as one of its inputs.
    pub fn accepts(&self, name: ParameterName) -> bool {
        self.accepted.contains(name)
    }
}

/// A resolved parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Scalar(f32),
    Point { x: f32, y: f32 },
}

impl ParameterValue {
    pub fn as_scalar(&self) -> Option<f32> {
        match *self {
            ParameterValue::Scalar(v) => Some(v),
            ParameterValue::Point { .. } => None,
        }
    }

    pub fn as_point(&self) -> Option<(f32, f32)> {
        match *self {
            ParameterValue::Point { x, y } => Some((x, y)),
            ParameterValue::Scalar(_) => None,
        }
    }

    /// True if every component is a finite number.
    pub fn is_finite(&self) -> bool {
        match *self {
            ParameterValue::Scalar(v) => v.is_finite(),
            ParameterValue::Point { x, y } => x.is_finite() && y.is_finite(),
        }
    }
}

/// The named values submitted to the engine for one render.
///
/// Built fresh for every render; it has no identity beyond that call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterMap {
    values: BTreeMap<ParameterName, ParameterValue>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: ParameterName, value: ParameterValue) {
        self.values.insert(name, value);
    }

    pub fn get(&self, name: ParameterName) -> Option<&ParameterValue> {
        self.values.get(&name)
    }

    pub fn contains(&self, name: ParameterName) -> bool {
        self.values.contains_key(&name)
    }

    /// Scalar value for `name`, if present and scalar.
    pub fn scalar(&self, name: ParameterName) -> Option<f32> {
        self.get(name).and_then(ParameterValue::as_scalar)
    }

    /// Point value for `name`, if present and a point.
    pub fn point(&self, name: ParameterName) -> Option<(f32, f32)> {
        self.get(name).and_then(ParameterValue::as_point)
    }

    /// The set of names present in the map.
    pub fn names(&self) -> ParameterSet {
        self.values.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParameterName, ParameterValue)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }
}

/// Pixel dimensions of the loaded source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageExtent {
    pub width: u32,
    pub height: u32,
}

impl ImageExtent {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Midpoint of the extent in pixel coordinates.
    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

/// The two user controls, each in the range 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlState {
    /// Intensity slider (0.0 to 1.0)
    pub intensity: f32,
    /// Radius slider (0.0 to 1.0)
    pub radius: f32,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            intensity: 0.5,
            radius: 0.5,
        }
    }
}

impl ControlState {
    pub fn new(intensity: f32, radius: f32) -> Self {
        Self { intensity, radius }
    }

    /// Whether both controls lie in the slider range.
    pub fn in_range(&self) -> bool {
        (0.0..=1.0).contains(&self.intensity) && (0.0..=1.0).contains(&self.radius)
    }
}

/// Bound a raw control value to the slider range. NaN becomes 0.0.
#[inline]
pub fn clamp_control(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
