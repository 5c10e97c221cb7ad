//! Cropper Core - Crop overlay geometry
//!
//! This crate provides the geometry behind an interactive, touch-driven crop
//! overlay: where the crop window starts, which handle a touch grabs, and how
//! each drag reshapes the window while keeping it inside the image, above a
//! minimum size and (optionally) locked to an aspect ratio.
//!
//! Rendering is left to the host. The overlay reports the window, the
//! rule-of-thirds guidelines and the darkened area around the window.

pub mod aspect;
pub mod config;
pub mod edge;
pub mod handle;
pub mod overlay;
pub mod types;

pub use config::OverlayConfig;
pub use edge::{Edge, EdgeSet, MIN_CROP_LENGTH};
pub use handle::{pressed_handle, touch_offset, CropConstraints, Handle};
pub use overlay::{CropOverlay, Guidelines, SurroundingArea, TouchEvent};
pub use types::{AspectRatio, BoundingBox, CropError, GuidelineMode, Point, TouchOffset};
