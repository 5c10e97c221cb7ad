//! Core types shared by the crop window geometry.

use crate::aspect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for crop overlay configuration.
///
/// Geometric edge cases (degenerate bounding boxes, touches outside every
/// handle) are not errors; they are absorbed by the updater and classifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CropError {
    /// A configuration value was rejected; the previous configuration is kept.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// A point in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Offset between the exact touch location and the exact handle location.
///
/// A handle can be grabbed anywhere within the touch radius. The offset is
/// captured on press and added to every move point of the same gesture so
/// the handle does not jump under the finger.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchOffset {
    pub dx: f32,
    pub dy: f32,
}

impl TouchOffset {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Apply the offset to a raw touch point.
    pub fn apply(self, point: Point) -> Point {
        Point::new(point.x + self.dx, point.y + self.dy)
    }
}

/// The image's rectangle in view coordinates.
///
/// Supplied by the host on layout changes and held immutable for the
/// duration of a drag.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BoundingBox {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a box anchored at the origin with the given size.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// True when the box has no usable area (zero, negative or non-finite extent).
    pub fn is_degenerate(&self) -> bool {
        let finite = self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite();
        !(finite && self.width() > 0.0 && self.height() > 0.0)
    }

    /// Width divided by height, or `None` for a degenerate box.
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.is_degenerate() {
            return None;
        }
        aspect::checked_aspect_ratio(self.left, self.top, self.right, self.bottom)
    }
}

/// Target aspect ratio for fixed-ratio mode, as `x : y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectRatio {
    x: u32,
    y: u32,
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self { x: 1, y: 1 }
    }
}

impl AspectRatio {
    /// Create a ratio from host-supplied components.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidConfiguration` when either component is
    /// zero or negative.
    pub fn new(x: i32, y: i32) -> Result<Self, CropError> {
        Ok(Self {
            x: positive_component("x", x)?,
            y: positive_component("y", y)?,
        })
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    /// Replace the horizontal component, keeping `y`.
    pub fn with_x(self, x: i32) -> Result<Self, CropError> {
        Ok(Self {
            x: positive_component("x", x)?,
            ..self
        })
    }

    /// Replace the vertical component, keeping `x`.
    pub fn with_y(self, y: i32) -> Result<Self, CropError> {
        Ok(Self {
            y: positive_component("y", y)?,
            ..self
        })
    }

    /// The ratio as width / height.
    pub fn value(&self) -> f32 {
        self.x as f32 / self.y as f32
    }
}

fn positive_component(name: &str, value: i32) -> Result<u32, CropError> {
    if value <= 0 {
        return Err(CropError::InvalidConfiguration(format!(
            "aspect ratio {name} must be greater than 0, got {value}"
        )));
    }
    Ok(value as u32)
}

/// When the rule-of-thirds guidelines are drawn inside the crop window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum GuidelineMode {
    /// Never show guidelines.
    Off = 0,
    /// Show guidelines only while a handle is pressed.
    OnTouch = 1,
    /// Always show guidelines.
    #[default]
    On = 2,
}

impl TryFrom<u8> for GuidelineMode {
    type Error = CropError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(GuidelineMode::Off),
            1 => Ok(GuidelineMode::OnTouch),
            2 => Ok(GuidelineMode::On),
            _ => Err(CropError::InvalidConfiguration(format!(
                "guideline mode must be 0, 1 or 2, got {value}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_dimensions() {
        let bounds = BoundingBox::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(bounds.width(), 100.0);
        assert_eq!(bounds.height(), 50.0);
        assert_eq!(bounds.center(), Point::new(60.0, 45.0));
        assert_eq!(bounds.aspect_ratio(), Some(2.0));
    }

    #[test]
    fn test_bounding_box_degenerate() {
        assert!(BoundingBox::from_size(0.0, 100.0).is_degenerate());
        assert!(BoundingBox::from_size(100.0, -1.0).is_degenerate());
        assert!(BoundingBox::new(0.0, 0.0, f32::NAN, 10.0).is_degenerate());
        let unbounded = BoundingBox::new(0.0, 0.0, f32::INFINITY, 10.0);
        assert!(unbounded.is_degenerate());
        assert!(!BoundingBox::from_size(1.0, 1.0).is_degenerate());
        assert_eq!(BoundingBox::from_size(0.0, 0.0).aspect_ratio(), None);
    }

    #[test]
    fn test_aspect_ratio_default_is_square() {
        let ratio = AspectRatio::default();
        assert_eq!((ratio.x(), ratio.y()), (1, 1));
        assert_eq!(ratio.value(), 1.0);
    }

    #[test]
    fn test_aspect_ratio_rejects_non_positive() {
        assert!(AspectRatio::new(0, 1).is_err());
        assert!(AspectRatio::new(1, 0).is_err());
        assert!(AspectRatio::new(-4, 3).is_err());
        assert!(AspectRatio::default().with_x(0).is_err());
        assert!(AspectRatio::default().with_y(-2).is_err());
    }

    #[test]
    fn test_aspect_ratio_components() {
        let ratio = AspectRatio::new(16, 9).unwrap();
        assert!((ratio.value() - 16.0 / 9.0).abs() < 1e-6);

        let ratio = ratio.with_y(8).unwrap();
        assert_eq!(ratio.value(), 2.0);
    }

    #[test]
    fn test_touch_offset_apply() {
        let offset = TouchOffset::new(-3.0, 4.0);
        assert_eq!(offset.apply(Point::new(10.0, 10.0)), Point::new(7.0, 14.0));
    }

    #[test]
    fn test_guideline_mode_from_u8() {
        assert_eq!(GuidelineMode::try_from(0), Ok(GuidelineMode::Off));
        assert_eq!(GuidelineMode::try_from(1), Ok(GuidelineMode::OnTouch));
        assert_eq!(GuidelineMode::try_from(2), Ok(GuidelineMode::On));
        assert!(GuidelineMode::try_from(3).is_err());
        assert_eq!(GuidelineMode::default(), GuidelineMode::On);
    }

    #[test]
    fn test_crop_error_display() {
        let err = AspectRatio::new(0, 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: aspect ratio x must be greater than 0, got 0"
        );
    }
}
