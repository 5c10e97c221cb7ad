//! Aspect ratio arithmetic for the crop window.
//!
//! Ratios are always width / height. The plain functions are the arithmetic
//! definitions and leave clamping to the caller. The `checked_*` variants
//! return `None` instead of producing NaN or infinity for a zero height or a
//! non-positive ratio; the overlay falls back to a minimum-size window then.

use crate::edge::{Edge, EdgeSet};

/// Width / height of the rectangle with the given edges.
pub fn aspect_ratio(left: f32, top: f32, right: f32, bottom: f32) -> f32 {
    (right - left) / (bottom - top)
}

/// Like [`aspect_ratio`], but `None` when the height is not positive.
pub fn checked_aspect_ratio(left: f32, top: f32, right: f32, bottom: f32) -> Option<f32> {
    let ratio = aspect_ratio(left, top, right, bottom);
    (bottom - top > 0.0 && ratio.is_finite()).then_some(ratio)
}

/// Width of a rectangle spanning `top..bottom` at the target ratio.
pub fn calculate_width(top: f32, bottom: f32, ratio: f32) -> f32 {
    (bottom - top) * ratio
}

/// Height of a rectangle spanning `left..right` at the target ratio.
pub fn calculate_height(left: f32, right: f32, ratio: f32) -> f32 {
    (right - left) / ratio
}

/// Like [`calculate_height`], but `None` for a non-positive or non-finite ratio.
pub fn checked_height(left: f32, right: f32, ratio: f32) -> Option<f32> {
    if !(ratio > 0.0 && ratio.is_finite()) {
        return None;
    }
    let height = calculate_height(left, right, ratio);
    height.is_finite().then_some(height)
}

/// Like [`calculate_width`], but `None` for a non-positive or non-finite ratio.
pub fn checked_width(top: f32, bottom: f32, ratio: f32) -> Option<f32> {
    if !(ratio > 0.0 && ratio.is_finite()) {
        return None;
    }
    let width = calculate_width(top, bottom, ratio);
    width.is_finite().then_some(width)
}

/// Left edge that gives the target ratio with the other three edges fixed.
pub fn calculate_left(top: f32, right: f32, bottom: f32, ratio: f32) -> f32 {
    right - calculate_width(top, bottom, ratio)
}

/// Top edge that gives the target ratio with the other three edges fixed.
pub fn calculate_top(left: f32, right: f32, bottom: f32, ratio: f32) -> f32 {
    bottom - calculate_height(left, right, ratio)
}

/// Right edge that gives the target ratio with the other three edges fixed.
pub fn calculate_right(left: f32, top: f32, bottom: f32, ratio: f32) -> f32 {
    left + calculate_width(top, bottom, ratio)
}

/// Bottom edge that gives the target ratio with the other three edges fixed.
pub fn calculate_bottom(left: f32, top: f32, right: f32, ratio: f32) -> f32 {
    top + calculate_height(left, right, ratio)
}

/// Coordinate for `edge` that gives `ratio` with the other three edges of
/// `edges` held where they are.
pub fn solve_edge(edge: Edge, edges: &EdgeSet, ratio: f32) -> f32 {
    let EdgeSet {
        left,
        top,
        right,
        bottom,
    } = *edges;
    match edge {
        Edge::Left => calculate_left(top, right, bottom, ratio),
        Edge::Top => calculate_top(left, right, bottom, ratio),
        Edge::Right => calculate_right(left, top, bottom, ratio),
        Edge::Bottom => calculate_bottom(left, top, right, ratio),
    }
}
