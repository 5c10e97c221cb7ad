//! Hit testing: which handle, if any, a touch grabs.

use super::Handle;
use crate::edge::EdgeSet;
use crate::types::{Point, TouchOffset};

/// Windows narrower or shorter than this (in pixels) are "small": a touch
/// strictly inside them grabs `Center` before any edge handle, so a window
/// whose edge zones cover most of its area can still be moved.
pub const SMALL_RECT_THRESHOLD: f32 = 100.0;

/// Find the handle a touch at `point` grabs, or `None` for a miss.
///
/// Order of precedence:
/// 1. Corners within `handle_radius`. Corner zones may overlap on a small
///    window; the nearest corner wins.
/// 2. `Center`, if the window is small and the point lies strictly inside.
/// 3. Edge midpoint handles whose segment lies within `handle_radius`;
///    the nearest edge wins.
/// 4. `Center`, if the point lies strictly inside.
pub fn pressed_handle(
    point: Point,
    edges: &EdgeSet,
    handle_radius: f32,
    small_rect_threshold: f32,
) -> Option<Handle> {
    if !point.is_finite() || !edges.is_finite() {
        return None;
    }

    let corner = Handle::CORNERS
        .iter()
        .map(|&handle| (handle, point.distance_to(handle.anchor(edges))))
        .filter(|&(_, distance)| distance <= handle_radius)
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((handle, _)) = corner {
        return Some(handle);
    }

    let inside = edges.contains_strictly(point);
    let is_small = edges.width() < small_rect_threshold || edges.height() < small_rect_threshold;
    if inside && is_small {
        return Some(Handle::Center);
    }

    let side = Handle::SIDES
        .iter()
        .map(|&handle| (handle, distance_to_side(point, handle, edges)))
        .filter(|&(_, distance)| distance <= handle_radius)
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((handle, _)) = side {
        return Some(handle);
    }

    inside.then_some(Handle::Center)
}

/// Offset from the touch point to the exact location of `handle`.
///
/// Edge handles only track their own axis, so the other component is zero.
pub fn touch_offset(handle: Handle, point: Point, edges: &EdgeSet) -> TouchOffset {
    let anchor = handle.anchor(edges);
    let dx = anchor.x - point.x;
    let dy = anchor.y - point.y;
    match handle {
        Handle::Left | Handle::Right => TouchOffset::new(dx, 0.0),
        Handle::Top | Handle::Bottom => TouchOffset::new(0.0, dy),
        _ => TouchOffset::new(dx, dy),
    }
}

/// Distance from `point` to the segment drawn by an edge handle's side.
fn distance_to_side(point: Point, handle: Handle, edges: &EdgeSet) -> f32 {
    let (start, end) = match handle {
        Handle::Top => (
            Point::new(edges.left, edges.top),
            Point::new(edges.right, edges.top),
        ),
        Handle::Bottom => (
            Point::new(edges.left, edges.bottom),
            Point::new(edges.right, edges.bottom),
        ),
        Handle::Left => (
            Point::new(edges.left, edges.top),
            Point::new(edges.left, edges.bottom),
        ),
        Handle::Right => (
            Point::new(edges.right, edges.top),
            Point::new(edges.right, edges.bottom),
        ),
        _ => return f32::INFINITY,
    };
    distance_to_segment(point, start, end)
}

fn distance_to_segment(point: Point, start: Point, end: Point) -> f32 {
    let seg_x = end.x - start.x;
    let seg_y = end.y - start.y;
    let length_sq = seg_x * seg_x + seg_y * seg_y;
    if length_sq <= f32::EPSILON {
        return point.distance_to(start);
    }

    let projection = (point.x - start.x) * seg_x + (point.y - start.y) * seg_y;
    let t = (projection / length_sq).clamp(0.0, 1.0);
    point.distance_to(Point::new(start.x + t * seg_x, start.y + t * seg_y))
}
