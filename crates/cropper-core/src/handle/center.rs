//! Whole-window moves.

use super::CropConstraints;
use crate::edge::{Edge, EdgeSet};
use crate::types::Point;

/// Move the window so its center lands on `point`, then push it back inside
/// the box. Both axes keep their size, so a fixed ratio is preserved.
pub(super) fn update(edges: &mut EdgeSet, point: Point, constraints: &CropConstraints) {
    let center = edges.center();
    edges.translate(point.x - center.x, point.y - center.y);

    snap_axis(edges, Edge::Left, Edge::Right, constraints);
    snap_axis(edges, Edge::Top, Edge::Bottom, constraints);
}

/// Shift the pair so an edge past, or within snap radius of, its box side
/// sits flush with it.
fn snap_axis(edges: &mut EdgeSet, start: Edge, end: Edge, constraints: &CropConstraints) {
    let bounds = &constraints.bounds;
    let radius = constraints.snap_radius;

    let shift = if start.is_within_margin(edges, bounds, radius) {
        start.snap_offset(edges, bounds)
    } else if end.is_within_margin(edges, bounds, radius) {
        end.snap_offset(edges, bounds)
    } else {
        return;
    };

    start.offset(edges, shift);
    end.offset(edges, shift);
}
