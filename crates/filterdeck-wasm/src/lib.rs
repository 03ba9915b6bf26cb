//! Filterdeck WASM - WebAssembly bindings for Filterdeck
//!
//! This crate exposes the filterdeck-core edit session to JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `session` - The edit session: import, filter picking, sliders, save
//! - `types` - WASM-compatible wrapper types for photo data
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession } from '@filterdeck/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsEditSession();
//! console.log(session.filters()); // ["bump_distortion", "gaussian_blur", ...]
//! ```

use wasm_bindgen::prelude::*;

mod session;
mod types;

// Re-export public types
pub use session::JsEditSession;
pub use types::JsPhoto;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "filterdeck wasm loaded");
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Names of the parameters the adapter can set, in order.
#[wasm_bindgen]
pub fn parameter_names() -> Vec<String> {
    filterdeck_core::ParameterName::ALL
        .iter()
        .map(|name| name.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_parameter_names() {
        assert_eq!(
            parameter_names(),
            vec!["intensity", "radius", "scale", "center"]
        );
    }
}
