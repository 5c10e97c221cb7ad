//! Edge-midpoint handle drags.
//!
//! A side handle moves only its own edge. With a fixed ratio the two
//! perpendicular edges are then recomputed around the window's current
//! center to match the new length, shifted back inside the box instead of
//! being clipped when they would stick out.

use super::CropConstraints;
use crate::aspect;
use crate::edge::{clamp_between, snap_to, Edge, EdgeSet};

pub(super) fn update(
    edges: &mut EdgeSet,
    edge: Edge,
    coordinate: f32,
    constraints: &CropConstraints,
) {
    match constraints.aspect_ratio {
        None => edge.adjust(
            edges,
            coordinate,
            &constraints.bounds,
            constraints.snap_radius,
            constraints.min_length,
        ),
        Some(ratio) => update_fixed(edges, edge, coordinate, ratio, constraints),
    }
}

fn update_fixed(
    edges: &mut EdgeSet,
    edge: Edge,
    coordinate: f32,
    ratio: f32,
    constraints: &CropConstraints,
) {
    let bounds = &constraints.bounds;
    let min_length = constraints.min_length;

    // Length across the drag axis per unit of length along it.
    let across_per_along = if edge.is_horizontal() {
        ratio
    } else {
        1.0 / ratio
    };
    let (start, end) = if edge.is_horizontal() {
        (Edge::Left, Edge::Right)
    } else {
        (Edge::Top, Edge::Bottom)
    };
    let across_low = start.box_coordinate(bounds);
    let across_high = end.box_coordinate(bounds);

    let anchor = edge.opposite().coordinate(edges);
    let sign = edge.outward();
    let room = sign * (edge.box_coordinate(bounds) - anchor);

    let min_along = min_length.max(min_length / across_per_along);
    let max_along = room.min((across_high - across_low) / across_per_along);
    let has_room = max_along >= min_along;
    if !has_room {
        tracing::debug!(min_along, max_along, "no room for a ratio-locked window");
        return;
    }

    let limit = edge.box_coordinate(bounds);
    let target = snap_to(coordinate, limit, constraints.snap_radius);
    let along = clamp_between(sign * (target - anchor), min_along, max_along);
    edge.set_coordinate(edges, anchor + sign * along);

    let across = if edge.is_horizontal() {
        aspect::calculate_width(edges.top, edges.bottom, ratio)
    } else {
        aspect::calculate_height(edges.left, edges.right, ratio)
    };
    let center = (start.coordinate(edges) + end.coordinate(edges)) / 2.0;
    let mut low = clamp_between(center - across / 2.0, across_low, across_high - across);
    if low - across_low <= constraints.snap_radius {
        low = across_low;
    } else if across_high - (low + across) <= constraints.snap_radius {
        low = across_high - across;
    }

    start.set_coordinate(edges, low);
    end.set_coordinate(edges, low + across);
}

#[cfg(test)]
mod tests {
    use super::super::Handle;
    use super::*;
    use crate::types::{BoundingBox, Point};

    fn bounds() -> BoundingBox {
        BoundingBox::new(0.0, 0.0, 1000.0, 800.0)
    }

    fn drag(
        handle: Handle,
        edges: EdgeSet,
        x: f32,
        y: f32,
        constraints: &CropConstraints,
    ) -> EdgeSet {
        let mut edges = edges;
        handle.update_crop_window(&mut edges, Point::new(x, y), constraints);
        edges
    }

    #[test]
    fn test_free_side_moves_one_edge() {
        let constraints = CropConstraints::free(bounds(), 3.0, 40.0);
        let edges = EdgeSet::new(100.0, 80.0, 900.0, 720.0);

        let result = drag(Handle::Right, edges, 600.0, 10.0, &constraints);
        assert_eq!(result, EdgeSet::new(100.0, 80.0, 600.0, 720.0));

        let result = drag(Handle::Top, edges, 10.0, 300.0, &constraints);
        assert_eq!(result, EdgeSet::new(100.0, 300.0, 900.0, 720.0));
    }

    #[test]
    fn test_free_side_limits() {
        let constraints = CropConstraints::free(bounds(), 3.0, 40.0);
        let edges = EdgeSet::new(100.0, 80.0, 900.0, 720.0);

        let result = drag(Handle::Left, edges, 2000.0, 0.0, &constraints);
        assert_eq!(result.left, 860.0);

        let result = drag(Handle::Bottom, edges, 0.0, 2000.0, &constraints);
        assert_eq!(result.bottom, 800.0);

        let result = drag(Handle::Bottom, edges, 0.0, 798.0, &constraints);
        assert_eq!(result.bottom, 800.0);
    }

    #[test]
    fn test_fixed_right_recenters_height() {
        let constraints = CropConstraints::fixed(bounds(), 3.0, 40.0, 1.0);
        let edges = EdgeSet::new(300.0, 300.0, 500.0, 500.0);

        let result = drag(Handle::Right, edges, 600.0, 0.0, &constraints);
        // 300 px wide, 300 px tall around the old vertical center of 400
        assert_eq!(result, EdgeSet::new(300.0, 250.0, 600.0, 550.0));
    }

    #[test]
    fn test_fixed_bottom_recenters_width() {
        let constraints = CropConstraints::fixed(bounds(), 3.0, 40.0, 2.0);
        let edges = EdgeSet::new(300.0, 300.0, 500.0, 400.0);

        let result = drag(Handle::Bottom, edges, 0.0, 450.0, &constraints);
        // 150 px tall gives 300 px wide around the old center of 400
        assert_eq!(result, EdgeSet::new(250.0, 300.0, 550.0, 450.0));
    }

    #[test]
    fn test_fixed_shifts_instead_of_clipping() {
        let constraints = CropConstraints::fixed(bounds(), 3.0, 40.0, 1.0);
        let edges = EdgeSet::new(100.0, 20.0, 200.0, 120.0);

        let result = drag(Handle::Right, edges, 400.0, 0.0, &constraints);
        // 300 px tall centered on y=70 would start at -80; shifted down to 0
        assert_eq!(result, EdgeSet::new(100.0, 0.0, 400.0, 300.0));
    }

    #[test]
    fn test_fixed_length_limited_by_perpendicular_room() {
        let constraints = CropConstraints::fixed(bounds(), 3.0, 40.0, 1.0);
        let edges = EdgeSet::new(0.0, 300.0, 100.0, 400.0);

        let result = drag(Handle::Right, edges, 1000.0, 0.0, &constraints);
        // Height can never exceed the 800 px box, so width stops at 800
        assert_eq!(result, EdgeSet::new(0.0, 0.0, 800.0, 800.0));
    }

    #[test]
    fn test_fixed_min_length_on_derived_axis() {
        let constraints = CropConstraints::fixed(bounds(), 3.0, 40.0, 2.0);
        let edges = EdgeSet::new(300.0, 300.0, 500.0, 400.0);

        let result = drag(Handle::Left, edges, 490.0, 0.0, &constraints);
        // Width must stay >= 80 so that height stays >= 40
        assert_eq!(result.left, 420.0);
        assert_eq!(result.width(), 80.0);
        assert_eq!(result.height(), 40.0);
    }

    #[test]
    fn test_fixed_perpendicular_snaps_flush() {
        let constraints = CropConstraints::fixed(bounds(), 5.0, 40.0, 1.0);
        let edges = EdgeSet::new(300.0, 104.0, 400.0, 204.0);

        let result = drag(Handle::Right, edges, 490.0, 0.0, &constraints);
        // 190 px tall around y=154 starts at 59; no snap
        assert_eq!(result.top, 59.0);

        let edges = EdgeSet::new(300.0, 100.0, 400.0, 200.0);
        let result = drag(Handle::Right, edges, 596.0, 0.0, &constraints);
        // 296 px tall around y=150 starts at 2, within 5 px: flush with 0
        assert_eq!(result, EdgeSet::new(300.0, 0.0, 596.0, 296.0));
    }
}
