//! Overlay configuration.
//!
//! Hosts usually build an [`OverlayConfig`] from a JSON-like object; every
//! field has a default, so partial objects deserialize. Call
//! [`OverlayConfig::validate`] (done by [`CropOverlay::new`]) before use.
//!
//! [`CropOverlay::new`]: crate::overlay::CropOverlay::new

use crate::edge::MIN_CROP_LENGTH;
use crate::handle::SMALL_RECT_THRESHOLD;
use crate::types::{AspectRatio, CropError, GuidelineMode};
use serde::{Deserialize, Serialize};

/// Default touch radius around a handle, in pixels (a 48 px touch target).
pub const DEFAULT_HANDLE_RADIUS: f32 = 24.0;

/// Default distance within which an edge snaps to the image bounds.
pub const DEFAULT_SNAP_RADIUS: f32 = 3.0;

/// Configuration injected into a [`CropOverlay`](crate::overlay::CropOverlay).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// When the rule-of-thirds guidelines are shown.
    pub guideline_mode: GuidelineMode,
    /// Lock the window to `aspect_ratio_x : aspect_ratio_y`.
    pub fix_aspect_ratio: bool,
    /// Horizontal ratio component (must be > 0).
    pub aspect_ratio_x: i32,
    /// Vertical ratio component (must be > 0).
    pub aspect_ratio_y: i32,
    /// Touch radius around each handle, in pixels.
    pub handle_radius: f32,
    /// Snap distance to the image bounds, in pixels.
    pub snap_radius: f32,
    /// Minimum window width and height, in pixels.
    pub min_crop_length: f32,
    /// Windows below this width or height favor moving over edge resizing.
    pub small_rect_threshold: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            guideline_mode: GuidelineMode::default(),
            fix_aspect_ratio: false,
            aspect_ratio_x: 1,
            aspect_ratio_y: 1,
            handle_radius: DEFAULT_HANDLE_RADIUS,
            snap_radius: DEFAULT_SNAP_RADIUS,
            min_crop_length: MIN_CROP_LENGTH,
            small_rect_threshold: SMALL_RECT_THRESHOLD,
        }
    }
}

impl OverlayConfig {
    /// Check every field, returning the validated aspect ratio.
    ///
    /// # Errors
    ///
    /// `CropError::InvalidConfiguration` for a non-positive ratio component,
    /// a negative or non-finite radius or threshold, or a non-positive
    /// minimum length.
    pub fn validate(&self) -> Result<AspectRatio, CropError> {
        let ratio = AspectRatio::new(self.aspect_ratio_x, self.aspect_ratio_y)?;
        non_negative("handle_radius", self.handle_radius)?;
        non_negative("snap_radius", self.snap_radius)?;
        non_negative("small_rect_threshold", self.small_rect_threshold)?;
        if !(self.min_crop_length > 0.0 && self.min_crop_length.is_finite()) {
            return Err(CropError::InvalidConfiguration(format!(
                "min_crop_length must be a positive number, got {}",
                self.min_crop_length
            )));
        }
        Ok(ratio)
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), CropError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(CropError::InvalidConfiguration(format!(
            "{name} must be a non-negative number, got {value}"
        )))
    }
}
