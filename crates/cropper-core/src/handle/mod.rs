//! Crop window handles and the drag update rules they own.
//!
//! There are nine handles: four corners, four edge midpoints and the whole
//! window (`Center`). A drag always belongs to exactly one handle, chosen on
//! press by [`pressed_handle`]. Every move event then calls
//! [`Handle::update_crop_window`], which dispatches to the rule for that
//! handle family:
//!
//! - **Corners** (`corner`) move the two adjacent edges.
//! - **Sides** (`side`) move one edge.
//! - **Center** (`center`) translates the whole window.
//!
//! In fixed-ratio mode the corner and side rules derive the remaining edges
//! from the target ratio. All rules keep the window inside the bounding box
//! and at least `min_length` wide and tall.

mod center;
mod classify;
mod corner;
mod side;

pub use classify::{pressed_handle, touch_offset, SMALL_RECT_THRESHOLD};

use crate::edge::{Edge, EdgeSet};
use crate::types::{BoundingBox, Point};
use serde::{Deserialize, Serialize};

/// An interactive control point on the crop window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Left,
    Top,
    Right,
    Bottom,
    Center,
}

/// Limits a drag update must respect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropConstraints {
    /// Image rectangle the window must stay inside.
    pub bounds: BoundingBox,
    /// Edges within this distance of the box snap flush to it.
    pub snap_radius: f32,
    /// Minimum width and height of the window.
    pub min_length: f32,
    /// Target width / height when the ratio is fixed.
    pub aspect_ratio: Option<f32>,
}

impl CropConstraints {
    /// Constraints for a freely resizable window.
    pub fn free(bounds: BoundingBox, snap_radius: f32, min_length: f32) -> Self {
        Self {
            bounds,
            snap_radius,
            min_length,
            aspect_ratio: None,
        }
    }

    /// Constraints for a window locked to `aspect_ratio`.
    pub fn fixed(
        bounds: BoundingBox,
        snap_radius: f32,
        min_length: f32,
        aspect_ratio: f32,
    ) -> Self {
        Self {
            aspect_ratio: Some(aspect_ratio),
            ..Self::free(bounds, snap_radius, min_length)
        }
    }

    /// False for inputs no update can be computed from: a degenerate box or
    /// a non-positive ratio.
    fn is_usable(&self) -> bool {
        let ratio_ok = match self.aspect_ratio {
            Some(ratio) => ratio > 0.0 && ratio.is_finite(),
            None => true,
        };
        !self.bounds.is_degenerate()
            && ratio_ok
            && self.snap_radius.is_finite()
            && self.min_length.is_finite()
    }
}

impl Handle {
    pub const ALL: [Handle; 9] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
        Handle::Left,
        Handle::Top,
        Handle::Right,
        Handle::Bottom,
        Handle::Center,
    ];

    /// Corner handles in hit-test order.
    pub const CORNERS: [Handle; 4] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];

    /// Edge-midpoint handles in hit-test order.
    pub const SIDES: [Handle; 4] = [Handle::Top, Handle::Bottom, Handle::Left, Handle::Right];

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Handle::TopLeft | Handle::TopRight | Handle::BottomLeft | Handle::BottomRight
        )
    }

    pub fn is_side(self) -> bool {
        matches!(
            self,
            Handle::Left | Handle::Top | Handle::Right | Handle::Bottom
        )
    }

    /// Stable snake_case name, as exposed to hosts.
    pub fn as_str(self) -> &'static str {
        match self {
            Handle::TopLeft => "top_left",
            Handle::TopRight => "top_right",
            Handle::BottomLeft => "bottom_left",
            Handle::BottomRight => "bottom_right",
            Handle::Left => "left",
            Handle::Top => "top",
            Handle::Right => "right",
            Handle::Bottom => "bottom",
            Handle::Center => "center",
        }
    }

    /// The exact point this handle represents on the given window.
    pub fn anchor(self, edges: &EdgeSet) -> Point {
        let center = edges.center();
        match self {
            Handle::TopLeft => Point::new(edges.left, edges.top),
            Handle::TopRight => Point::new(edges.right, edges.top),
            Handle::BottomLeft => Point::new(edges.left, edges.bottom),
            Handle::BottomRight => Point::new(edges.right, edges.bottom),
            Handle::Left => Point::new(edges.left, center.y),
            Handle::Top => Point::new(center.x, edges.top),
            Handle::Right => Point::new(edges.right, center.y),
            Handle::Bottom => Point::new(center.x, edges.bottom),
            Handle::Center => center,
        }
    }

    /// Recompute the window for this handle dragged to `point`.
    ///
    /// `point` is the touch position with the press offset already applied.
    /// Inputs no update can be computed from (degenerate box, non-finite
    /// point) leave `edges` unchanged.
    pub fn update_crop_window(
        self,
        edges: &mut EdgeSet,
        point: Point,
        constraints: &CropConstraints,
    ) {
        if !constraints.is_usable() || !point.is_finite() {
            tracing::trace!(handle = self.as_str(), "skipping update for unusable input");
            return;
        }

        match self {
            Handle::TopLeft => corner::update(edges, Edge::Left, Edge::Top, point, constraints),
            Handle::TopRight => corner::update(edges, Edge::Right, Edge::Top, point, constraints),
            Handle::BottomLeft => {
                corner::update(edges, Edge::Left, Edge::Bottom, point, constraints)
            }
            Handle::BottomRight => {
                corner::update(edges, Edge::Right, Edge::Bottom, point, constraints)
            }
            Handle::Left => side::update(edges, Edge::Left, point.x, constraints),
            Handle::Top => side::update(edges, Edge::Top, point.y, constraints),
            Handle::Right => side::update(edges, Edge::Right, point.x, constraints),
            Handle::Bottom => side::update(edges, Edge::Bottom, point.y, constraints),
            Handle::Center => center::update(edges, point, constraints),
        }

        tracing::trace!(
            handle = self.as_str(),
            left = edges.left,
            top = edges.top,
            right = edges.right,
            bottom = edges.bottom,
            "crop window updated"
        );
    }
}
