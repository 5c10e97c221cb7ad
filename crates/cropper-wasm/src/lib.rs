//! Cropper WASM - WebAssembly bindings for the crop overlay
//!
//! This crate provides WASM bindings to expose the cropper-core overlay to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `overlay` - The interactive crop overlay (`JsCropOverlay`)
//! - `types` - WASM-compatible wrapper types for crop windows
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropOverlay } from '@cropper/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const overlay = new JsCropOverlay({ guideline_mode: 'on_touch' });
//! overlay.set_bounding_box(0, 0, 1024, 768);
//! const w = overlay.window();
//! console.log(`Crop ${w.width}x${w.height} at ${w.left},${w.top}`);
//! ```

use wasm_bindgen::prelude::*;

mod overlay;
mod types;

// Re-export public types
pub use overlay::JsCropOverlay;
pub use types::JsCropWindow;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
