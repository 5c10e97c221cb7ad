//! WASM-compatible wrapper types for crop overlay data.
//!
//! This module provides JavaScript-friendly types that wrap the core cropper
//! types, handling the conversion between Rust and JavaScript representations.

use cropper_core::{BoundingBox, CropError, EdgeSet, GuidelineMode};
use wasm_bindgen::prelude::*;

/// A snapshot of the crop window for JavaScript.
///
/// Coordinates are in view pixels, the same space as the bounding box and
/// touch events passed to the overlay.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsCropWindow {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

#[wasm_bindgen]
impl JsCropWindow {
    /// Create a window from its four edge coordinates.
    #[wasm_bindgen(constructor)]
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> JsCropWindow {
        JsCropWindow {
            left,
            top,
            right,
            bottom,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn left(&self) -> f32 {
        self.left
    }

    #[wasm_bindgen(getter)]
    pub fn top(&self) -> f32 {
        self.top
    }

    #[wasm_bindgen(getter)]
    pub fn right(&self) -> f32 {
        self.right
    }

    #[wasm_bindgen(getter)]
    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    /// Window width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Window height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

impl From<EdgeSet> for JsCropWindow {
    fn from(edges: EdgeSet) -> Self {
        JsCropWindow::new(edges.left, edges.top, edges.right, edges.bottom)
    }
}

impl From<BoundingBox> for JsCropWindow {
    fn from(bounds: BoundingBox) -> Self {
        JsCropWindow::new(bounds.left, bounds.top, bounds.right, bounds.bottom)
    }
}

/// Convert a u8 guideline mode value to the core enum.
///
/// Values:
/// - 0 = Off
/// - 1 = OnTouch (only while a handle is pressed)
/// - 2 = On
///
/// Unlike most numeric options, unknown values are rejected rather than
/// defaulted, since they usually mean the host sent the wrong field.
pub(crate) fn guideline_mode_from_u8(value: u8) -> Result<GuidelineMode, CropError> {
    GuidelineMode::try_from(value)
}

/// Turn a core error into the string `JsValue` thrown to JavaScript.
pub(crate) fn to_js_error(err: CropError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
