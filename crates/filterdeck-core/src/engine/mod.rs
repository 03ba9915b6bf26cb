//! Image processing engine seam.
//!
//! An engine owns the filter catalog: it says which parameters each filter
//! accepts and renders a filter over a source photo. The session never
//! hard-codes per-filter knowledge; it asks the engine.
//!
//! [`CpuEngine`] is the bundled implementation, running the seven catalog
//! filters on the CPU with the `image` crate.

mod catalog;
mod cpu;
mod filters;

use std::sync::Arc;

use thiserror::Error;

use crate::codec::Photo;
use crate::params::{FilterSpec, ParameterMap, ParameterName};

pub use catalog::BuiltinFilter;
pub use cpu::CpuEngine;

/// Reasons an engine can fail to produce an output image.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// The engine has no filter with this name.
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    /// The source photo is empty or its buffer is malformed.
    #[error("Invalid source image: {0}")]
    InvalidSource(String),

    /// A parameter value is not a finite number.
    #[error("Invalid value for parameter '{0}'")]
    InvalidParameter(ParameterName),
}

/// A filter evaluation engine.
pub trait ImageEngine {
    /// Filter names in display order.
    fn catalog(&self) -> Vec<&str>;

    /// Accepted parameter names for `filter`, or `None` if unknown.
    fn filter_spec(&self, filter: &str) -> Option<FilterSpec>;

    /// Render `filter` over `source` with the given parameters.
    ///
    /// Parameters the filter does not accept are ignored; accepted
    /// parameters missing from the map fall back to engine defaults.
    fn render(
        &self,
        filter: &str,
        params: &ParameterMap,
        source: &Photo,
    ) -> Result<Photo, RenderError>;
}

impl<E: ImageEngine + ?Sized> ImageEngine for &E {
    fn catalog(&self) -> Vec<&str> {
        (**self).catalog()
    }

    fn filter_spec(&self, filter: &str) -> Option<FilterSpec> {
        (**self).filter_spec(filter)
    }

    fn render(
        &self,
        filter: &str,
        params: &ParameterMap,
        source: &Photo,
    ) -> Result<Photo, RenderError> {
        (**self).render(filter, params, source)
    }
}

impl<E: ImageEngine + ?Sized> ImageEngine for Arc<E> {
    fn catalog(&self) -> Vec<&str> {
        (**self).catalog()
    }

    fn filter_spec(&self, filter: &str) -> Option<FilterSpec> {
        (**self).filter_spec(filter)
    }

    fn render(
        &self,
        filter: &str,
        params: &ParameterMap,
        source: &Photo,
    ) -> Result<Photo, RenderError> {
        (**self).render(filter, params, source)
    }
}
