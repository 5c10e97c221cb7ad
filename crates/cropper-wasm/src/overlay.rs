//! Crop overlay WASM bindings.
//!
//! This module exposes the core `CropOverlay` to JavaScript. A host view
//! creates one overlay per crop session, tells it where the image sits in
//! the view, forwards pointer events to it and redraws from its state after
//! each event.

use crate::types::{guideline_mode_from_u8, to_js_error, JsCropWindow};
use cropper_core::{BoundingBox, CropOverlay, OverlayConfig, TouchEvent};
use wasm_bindgen::prelude::*;

/// Interactive crop overlay accessible from JavaScript.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const overlay = new JsCropOverlay({
///   fix_aspect_ratio: true,
///   aspect_ratio_x: 16,
///   aspect_ratio_y: 9,
/// });
/// overlay.set_bounding_box(0, 0, canvas.width, canvas.height);
///
/// canvas.onpointerdown = (e) => overlay.touch_down(e.offsetX, e.offsetY) && redraw();
/// canvas.onpointermove = (e) => overlay.touch_move(e.offsetX, e.offsetY) && redraw();
/// canvas.onpointerup = () => overlay.touch_up() && redraw();
///
/// function redraw() {
///   const w = overlay.window();
///   ctx.strokeRect(w.left, w.top, w.width, w.height);
///   const lines = overlay.guidelines(); // undefined when hidden
/// }
/// ```
#[wasm_bindgen]
pub struct JsCropOverlay {
    inner: CropOverlay,
}

#[wasm_bindgen]
impl JsCropOverlay {
    /// Create an overlay from a configuration object.
    ///
    /// Every field is optional; `undefined` or `null` uses the defaults.
    ///
    /// # Errors
    /// Returns error if the object cannot be deserialized or holds invalid
    /// values (a non-positive ratio component, a negative radius).
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsCropOverlay, JsValue> {
        let config: OverlayConfig = if config.is_undefined() || config.is_null() {
            OverlayConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid overlay config: {}", e)))?
        };

        let inner = CropOverlay::new(config).map_err(to_js_error)?;
        Ok(JsCropOverlay { inner })
    }

    /// Create an overlay with the default configuration.
    pub fn with_defaults() -> JsCropOverlay {
        JsCropOverlay {
            inner: CropOverlay::default(),
        }
    }

    /// Set where the image is drawn in the view. Re-seeds the window.
    pub fn set_bounding_box(&mut self, left: f32, top: f32, right: f32, bottom: f32) {
        self.inner
            .set_bounding_box(BoundingBox::new(left, top, right, bottom));
    }

    /// Put the window back at its default placement.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Forward a pointer-down. Returns `true` if the overlay consumed it.
    pub fn touch_down(&mut self, x: f32, y: f32) -> bool {
        self.inner.on_touch(TouchEvent::Down { x, y })
    }

    /// Forward a pointer-move. Returns `true` if the overlay consumed it.
    pub fn touch_move(&mut self, x: f32, y: f32) -> bool {
        self.inner.on_touch(TouchEvent::Move { x, y })
    }

    pub fn touch_up(&mut self) -> bool {
        self.inner.on_touch(TouchEvent::Up)
    }

    pub fn touch_cancel(&mut self) -> bool {
        self.inner.on_touch(TouchEvent::Cancel)
    }

    /// Current crop window.
    pub fn window(&self) -> JsCropWindow {
        self.inner.edges().into()
    }

    #[wasm_bindgen(getter)]
    pub fn left(&self) -> f32 {
        self.inner.edges().left
    }

    #[wasm_bindgen(getter)]
    pub fn top(&self) -> f32 {
        self.inner.edges().top
    }

    #[wasm_bindgen(getter)]
    pub fn right(&self) -> f32 {
        self.inner.edges().right
    }

    #[wasm_bindgen(getter)]
    pub fn bottom(&self) -> f32 {
        self.inner.edges().bottom
    }

    /// Current crop window as a plain `{ left, top, right, bottom }` object.
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn edges(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.edges())
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize edges: {}", e)))
    }

    /// Image bounds the window is kept inside.
    pub fn bounding_box(&self) -> JsCropWindow {
        self.inner.bounding_box().into()
    }

    /// Name of the handle being dragged (`"top_left"`, `"center"`, ...), or
    /// `undefined` between gestures.
    pub fn pressed_handle(&self) -> Option<String> {
        self.inner
            .pressed_handle()
            .map(|handle| handle.as_str().to_string())
    }

    /// Whether guidelines should be drawn right now.
    #[wasm_bindgen(getter)]
    pub fn shows_guidelines(&self) -> bool {
        self.inner.shows_guidelines()
    }

    /// Guideline positions as `{ vertical: [x1, x2], horizontal: [y1, y2] }`,
    /// or `undefined` when hidden.
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn guidelines(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.guidelines())
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize guidelines: {}", e)))
    }

    /// The four darkened bands around the window, as
    /// `{ top, bottom, left, right }` rectangles.
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn surrounding_area(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.surrounding_area())
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize surrounding area: {}", e)))
    }

    /// Current configuration as a plain object.
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.config())
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize config: {}", e)))
    }

    /// Set the guideline mode (0 = off, 1 = on touch, 2 = on).
    ///
    /// # Errors
    /// Returns error for any other value
    pub fn set_guideline_mode(&mut self, mode: u8) -> Result<(), JsValue> {
        let mode = guideline_mode_from_u8(mode).map_err(to_js_error)?;
        self.inner.set_guideline_mode(mode);
        Ok(())
    }

    pub fn set_fixed_aspect_ratio(&mut self, fixed: bool) {
        self.inner.set_fixed_aspect_ratio(fixed);
    }

    /// # Errors
    /// Returns error if `x <= 0`
    pub fn set_aspect_ratio_x(&mut self, x: i32) -> Result<(), JsValue> {
        self.inner.set_aspect_ratio_x(x).map_err(to_js_error)
    }

    /// # Errors
    /// Returns error if `y <= 0`
    pub fn set_aspect_ratio_y(&mut self, y: i32) -> Result<(), JsValue> {
        self.inner.set_aspect_ratio_y(y).map_err(to_js_error)
    }

    /// Set both ratio components with a single re-seed.
    ///
    /// # Errors
    /// Returns error if either component is `<= 0`
    pub fn set_aspect_ratio(&mut self, x: i32, y: i32) -> Result<(), JsValue> {
        self.inner.set_aspect_ratio(x, y).map_err(to_js_error)
    }

    /// Set the initial attributes without re-seeding the window.
    ///
    /// # Errors
    /// Returns error for an unknown guideline mode or a ratio component `<= 0`
    pub fn set_initial_attribute_values(
        &mut self,
        guideline_mode: u8,
        fix_aspect_ratio: bool,
        aspect_ratio_x: i32,
        aspect_ratio_y: i32,
    ) -> Result<(), JsValue> {
        let mode = guideline_mode_from_u8(guideline_mode).map_err(to_js_error)?;
        self.inner
            .set_initial_attribute_values(mode, fix_aspect_ratio, aspect_ratio_x, aspect_ratio_y)
            .map_err(to_js_error)
    }

    /// Enable or disable touch handling.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.inner.set_enabled(enabled);
    }

    #[wasm_bindgen(getter)]
    pub fn enabled(&self) -> bool {
        self.inner.is_enabled()
    }

    #[wasm_bindgen(getter)]
    pub fn fix_aspect_ratio(&self) -> bool {
        self.inner.config().fix_aspect_ratio
    }

    #[wasm_bindgen(getter)]
    pub fn aspect_ratio_x(&self) -> u32 {
        self.inner.aspect_ratio().x()
    }

    #[wasm_bindgen(getter)]
    pub fn aspect_ratio_y(&self) -> u32 {
        self.inner.aspect_ratio().y()
    }
}


/// WASM-specific tests that require JsValue.
///
/// These tests use functions that return `Result<T, JsValue>` and can only
/// run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_new_with_undefined_config() {
        let overlay = JsCropOverlay::new(JsValue::UNDEFINED).unwrap();
        assert!(!overlay.fix_aspect_ratio());
        assert_eq!(overlay.aspect_ratio_x(), 1);
    }

    #[wasm_bindgen_test]
    fn test_new_with_config_object() {
        let config = serde_wasm_bindgen::to_value(&OverlayConfig {
            fix_aspect_ratio: true,
            aspect_ratio_x: 4,
            aspect_ratio_y: 3,
            ..OverlayConfig::default()
        })
        .unwrap();
        let mut overlay = JsCropOverlay::new(config).unwrap();
        overlay.set_bounding_box(0.0, 0.0, 1000.0, 800.0);

        let window = overlay.window();
        assert!((window.width() / window.height() - 4.0 / 3.0).abs() < 1e-4);
    }

    #[wasm_bindgen_test]
    fn test_new_rejects_invalid_ratio() {
        let config = serde_wasm_bindgen::to_value(&OverlayConfig {
            aspect_ratio_x: 0,
            ..OverlayConfig::default()
        })
        .unwrap();
        assert!(JsCropOverlay::new(config).is_err());
    }

    #[wasm_bindgen_test]
    fn test_setters_reject_invalid_values() {
        let mut overlay = JsCropOverlay::with_defaults();
        overlay.set_bounding_box(0.0, 0.0, 1000.0, 800.0);
        let before = overlay.window();

        assert!(overlay.set_aspect_ratio_x(0).is_err());
        assert!(overlay.set_aspect_ratio_y(-1).is_err());
        assert!(overlay.set_aspect_ratio(3, 0).is_err());
        assert!(overlay.set_guideline_mode(7).is_err());
        assert!(overlay.set_initial_attribute_values(1, true, 0, 1).is_err());
        assert_eq!(overlay.window(), before);
    }

    #[wasm_bindgen_test]
    fn test_setters_accept_valid_values() {
        let mut overlay = JsCropOverlay::with_defaults();
        assert!(overlay.set_aspect_ratio(16, 9).is_ok());
        assert!(overlay.set_guideline_mode(1).is_ok());
        assert!(overlay.set_initial_attribute_values(0, true, 3, 2).is_ok());
        assert_eq!((overlay.aspect_ratio_x(), overlay.aspect_ratio_y()), (3, 2));
    }

    #[wasm_bindgen_test]
    fn test_guidelines_undefined_when_hidden() {
        let mut overlay = JsCropOverlay::with_defaults();
        overlay.set_bounding_box(0.0, 0.0, 1000.0, 800.0);
        assert!(!overlay.guidelines().unwrap().is_undefined());
        assert!(overlay.edges().unwrap().is_object());

        overlay.set_guideline_mode(0).unwrap();
        assert!(overlay.guidelines().unwrap().is_undefined());
        assert!(overlay.surrounding_area().unwrap().is_object());
    }
}
