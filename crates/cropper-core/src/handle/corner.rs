//! Corner handle drags.
//!
//! A corner moves the vertical edge (left or right) it touches to the
//! point's x and the horizontal edge (top or bottom) to the point's y.
//!
//! # Fixed Ratio
//!
//! The diagonally opposite corner stays put. The point proposes two
//! windows: one sized by its horizontal distance from the anchor
//! (width-driven) and one by its vertical distance (height-driven). The
//! point pushes past the target ratio along one axis, and that axis drives,
//! so the window grows to reach the finger. The other candidate is used when
//! the driving one would not fit the box. Near the diagonal, where the two
//! candidates barely differ, the one closer to the current size wins so the
//! window does not flip between them.

use super::CropConstraints;
use crate::aspect;
use crate::edge::{clamp_between, snap_to, Edge, EdgeSet};
use crate::types::Point;

/// Relative difference between the two candidate widths below which a
/// corner drag counts as diagonal.
const AMBIGUOUS_RATIO_TOLERANCE: f32 = 0.01;

pub(super) fn update(
    edges: &mut EdgeSet,
    vertical: Edge,
    horizontal: Edge,
    point: Point,
    constraints: &CropConstraints,
) {
    match constraints.aspect_ratio {
        None => {
            let bounds = &constraints.bounds;
            let (snap_radius, min_length) = (constraints.snap_radius, constraints.min_length);
            vertical.adjust(edges, point.x, bounds, snap_radius, min_length);
            horizontal.adjust(edges, point.y, bounds, snap_radius, min_length);
        }
        Some(ratio) => update_fixed(edges, vertical, horizontal, point, ratio, constraints),
    }
}

fn update_fixed(
    edges: &mut EdgeSet,
    vertical: Edge,
    horizontal: Edge,
    point: Point,
    ratio: f32,
    constraints: &CropConstraints,
) {
    let bounds = &constraints.bounds;
    let min_length = constraints.min_length;

    let anchor_x = vertical.opposite().coordinate(edges);
    let anchor_y = horizontal.opposite().coordinate(edges);
    let sign_x = vertical.outward();
    let sign_y = horizontal.outward();

    // Space between the fixed corner and the box on the dragged side.
    let room_x = sign_x * (vertical.box_coordinate(bounds) - anchor_x);
    let room_y = sign_y * (horizontal.box_coordinate(bounds) - anchor_y);

    let min_width = min_length.max(min_length * ratio);
    let max_width = room_x.min(room_y * ratio);
    let has_room = max_width >= min_width;
    if !has_room {
        tracing::debug!(min_width, max_width, "no room for a ratio-locked window");
        return;
    }

    let snap_radius = constraints.snap_radius;
    let x = snap_to(point.x, vertical.box_coordinate(bounds), snap_radius);
    let y = snap_to(point.y, horizontal.box_coordinate(bounds), snap_radius);
    let by_width = sign_x * (x - anchor_x);
    let by_height = sign_y * (y - anchor_y) * ratio;

    let fits = |width: f32| width >= min_width && width <= max_width;
    let (driving, derived) = if by_width > by_height {
        (by_width, by_height)
    } else {
        (by_height, by_width)
    };

    let spread = (by_width - by_height).abs();
    let ambiguous = spread <= AMBIGUOUS_RATIO_TOLERANCE * by_width.abs().max(by_height.abs());

    let width = if ambiguous && fits(by_width) && fits(by_height) {
        let current = edges.width();
        if (by_width - current).abs() <= (by_height - current).abs() {
            by_width
        } else {
            by_height
        }
    } else if fits(driving) || !fits(derived) {
        driving
    } else {
        derived
    };

    let width = clamp_between(width, min_width, max_width);
    vertical.set_coordinate(edges, anchor_x + sign_x * width);
    let derived = aspect::solve_edge(horizontal, edges, ratio);
    horizontal.set_coordinate(edges, derived);
}
