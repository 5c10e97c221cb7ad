//! The crop window's four edges.
//!
//! An [`EdgeSet`] holds four independent coordinates. [`Edge`] names one of
//! them and knows how to read, write and move it, how far it sits from the
//! matching side of the bounding box, and how to pull it back within the
//! allowed range after a drag.
//!
//! # Coordinate System
//!
//! View coordinates, origin top-left, y grows downward. `left <= right` and
//! `top <= bottom` always hold for a valid crop window.

use crate::types::{BoundingBox, Point};
use serde::{Deserialize, Serialize};

/// Default minimum width and height of the crop window, in pixels.
pub const MIN_CROP_LENGTH: f32 = 40.0;

/// The four edge coordinates of the crop window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeSet {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl EdgeSet {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
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

    /// Move all four edges by the same amount.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.left += dx;
        self.right += dx;
        self.top += dy;
        self.bottom += dy;
    }

    /// Check whether a point lies strictly inside the window.
    pub fn contains_strictly(&self, point: Point) -> bool {
        point.x > self.left && point.x < self.right && point.y > self.top && point.y < self.bottom
    }

    /// Check whether the window lies inside `bounds`, allowing `tolerance`
    /// of floating point slack on each side.
    pub fn is_within(&self, bounds: &BoundingBox, tolerance: f32) -> bool {
        self.left >= bounds.left - tolerance
            && self.top >= bounds.top - tolerance
            && self.right <= bounds.right + tolerance
            && self.bottom <= bounds.bottom + tolerance
    }

    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }
}

/// One side of the crop window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom];

    pub fn opposite(self) -> Edge {
        match self {
            Edge::Left => Edge::Right,
            Edge::Top => Edge::Bottom,
            Edge::Right => Edge::Left,
            Edge::Bottom => Edge::Top,
        }
    }

    /// Top and bottom are horizontal lines; left and right are vertical.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Edge::Top | Edge::Bottom)
    }

    /// Direction the edge moves when the window grows: -1 for left/top,
    /// +1 for right/bottom.
    pub fn outward(self) -> f32 {
        match self {
            Edge::Left | Edge::Top => -1.0,
            Edge::Right | Edge::Bottom => 1.0,
        }
    }

    pub fn coordinate(self, edges: &EdgeSet) -> f32 {
        match self {
            Edge::Left => edges.left,
            Edge::Top => edges.top,
            Edge::Right => edges.right,
            Edge::Bottom => edges.bottom,
        }
    }

    pub fn set_coordinate(self, edges: &mut EdgeSet, value: f32) {
        match self {
            Edge::Left => edges.left = value,
            Edge::Top => edges.top = value,
            Edge::Right => edges.right = value,
            Edge::Bottom => edges.bottom = value,
        }
    }

    pub fn offset(self, edges: &mut EdgeSet, distance: f32) {
        let value = self.coordinate(edges) + distance;
        self.set_coordinate(edges, value);
    }

    /// The matching side of the bounding box.
    pub fn box_coordinate(self, bounds: &BoundingBox) -> f32 {
        match self {
            Edge::Left => bounds.left,
            Edge::Top => bounds.top,
            Edge::Right => bounds.right,
            Edge::Bottom => bounds.bottom,
        }
    }

    /// Inward distance from the box side to this edge.
    ///
    /// Zero when flush, negative when the edge lies outside the box.
    pub fn margin(self, edges: &EdgeSet, bounds: &BoundingBox) -> f32 {
        self.margin_of(self.coordinate(edges), bounds)
    }

    fn margin_of(self, coordinate: f32, bounds: &BoundingBox) -> f32 {
        self.outward() * (self.box_coordinate(bounds) - coordinate)
    }

    /// True when the edge is within `margin` of its box side, or past it.
    pub fn is_within_margin(self, edges: &EdgeSet, bounds: &BoundingBox, margin: f32) -> bool {
        self.margin(edges, bounds) <= margin
    }

    /// Distance to move this edge so it sits flush with its box side.
    pub fn snap_offset(self, edges: &EdgeSet, bounds: &BoundingBox) -> f32 {
        self.box_coordinate(bounds) - self.coordinate(edges)
    }

    /// Move this edge toward `target` without letting it leave the box or
    /// come closer than `min_length` to the opposite edge, then snap it to
    /// the box side if it ends up within `snap_radius` of it.
    ///
    /// Snapping only ever moves the edge outward, so the minimum length
    /// established by the clamp is kept.
    pub fn adjust(
        self,
        edges: &mut EdgeSet,
        target: f32,
        bounds: &BoundingBox,
        snap_radius: f32,
        min_length: f32,
    ) {
        let limit = self.box_coordinate(bounds);
        let floor = self.opposite().coordinate(edges) + self.outward() * min_length;
        if self.outward() * (limit - floor) < 0.0 {
            tracing::debug!(edge = ?self, limit, floor, "box too small for minimum crop length");
        }

        let clamped = if self.outward() < 0.0 {
            clamp_between(target, limit, floor)
        } else {
            clamp_between(target, floor, limit)
        };

        let margin = self.margin_of(clamped, bounds);
        let value = if (0.0..=snap_radius).contains(&margin) {
            limit
        } else {
            clamped
        };
        self.set_coordinate(edges, value);
    }
}

/// Clamp `value` into `[low, high]`.
///
/// Unlike `f32::clamp` this never panics: when the range is inverted the
/// upper bound wins.
pub(crate) fn clamp_between(value: f32, low: f32, high: f32) -> f32 {
    value.max(low).min(high)
}

/// Replace `value` with `target` when it lies within `radius` of it.
pub(crate) fn snap_to(value: f32, target: f32, radius: f32) -> f32 {
    if (value - target).abs() <= radius {
        target
    } else {
        value
    }
}
