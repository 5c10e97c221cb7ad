//! The crop overlay: configuration, window state and touch handling.
//!
//! [`CropOverlay`] is what a host view owns. It receives the image bounds
//! and raw touch events, runs them through the classifier and the handle
//! update rules, and exposes the current window plus the geometry a
//! renderer needs (guidelines and the darkened area around the window).
//!
//! # Lifecycle
//!
//! The window is seeded when the bounding box is set. After that first
//! seeding, changing the guideline mode, the fixed-ratio flag or either
//! ratio component re-seeds it to the default placement. Between gestures
//! the window is left untouched.
//!
//! # Gestures
//!
//! A gesture is `Down`, any number of `Move`s, then `Up` or `Cancel`. Only
//! one gesture is active at a time; the host delivers events serially.

use crate::aspect;
use crate::config::OverlayConfig;
use crate::edge::{clamp_between, Edge, EdgeSet};
use crate::handle::{pressed_handle, touch_offset, CropConstraints, Handle};
use crate::types::{AspectRatio, BoundingBox, CropError, GuidelineMode, Point, TouchOffset};
use serde::{Deserialize, Serialize};

/// Fraction of the image left as padding around the initial free window.
const INITIAL_PADDING: f32 = 0.1;

/// A touch event in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TouchEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    Cancel,
}

/// Rule-of-thirds guideline positions inside the crop window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Guidelines {
    /// x coordinates of the two vertical lines.
    pub vertical: [f32; 2],
    /// y coordinates of the two horizontal lines.
    pub horizontal: [f32; 2],
}

/// The four bands of the image outside the crop window.
///
/// `top` and `bottom` span the full image width; `left` and `right` fill the
/// space beside the window between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurroundingArea {
    pub top: BoundingBox,
    pub bottom: BoundingBox,
    pub left: BoundingBox,
    pub right: BoundingBox,
}

/// Crop window state for one overlay view.
#[derive(Debug, Clone)]
pub struct CropOverlay {
    config: OverlayConfig,
    aspect_ratio: AspectRatio,
    bounds: BoundingBox,
    edges: EdgeSet,
    pressed_handle: Option<Handle>,
    touch_offset: TouchOffset,
    initialized: bool,
    enabled: bool,
}

impl Default for CropOverlay {
    fn default() -> Self {
        Self {
            config: OverlayConfig::default(),
            aspect_ratio: AspectRatio::default(),
            bounds: BoundingBox::default(),
            edges: EdgeSet::default(),
            pressed_handle: None,
            touch_offset: TouchOffset::default(),
            initialized: false,
            enabled: true,
        }
    }
}

impl CropOverlay {
    /// Create an overlay. The window is seeded once a bounding box is set.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidConfiguration` if `config` fails
    /// [`OverlayConfig::validate`].
    pub fn new(config: OverlayConfig) -> Result<Self, CropError> {
        let aspect_ratio = config.validate()?;
        Ok(Self {
            config,
            aspect_ratio,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    /// Current crop window.
    pub fn edges(&self) -> EdgeSet {
        self.edges
    }

    /// Handle being dragged, if a gesture is in progress.
    pub fn pressed_handle(&self) -> Option<Handle> {
        self.pressed_handle
    }

    /// Whether the window has been seeded from a bounding box yet.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable touch handling. Disabling ends any active gesture.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.release();
        }
    }

    /// Target width / height, when the ratio is fixed.
    pub fn target_aspect_ratio(&self) -> Option<f32> {
        self.config
            .fix_aspect_ratio
            .then(|| self.aspect_ratio.value())
    }

    /// Constraints applied to every drag update.
    pub fn constraints(&self) -> CropConstraints {
        CropConstraints {
            bounds: self.bounds,
            snap_radius: self.config.snap_radius,
            min_length: self.config.min_crop_length,
            aspect_ratio: self.target_aspect_ratio(),
        }
    }

    /// Inform the overlay of the image's position in the view and re-seed
    /// the window for it.
    pub fn set_bounding_box(&mut self, bounds: BoundingBox) {
        self.bounds = bounds;
        self.pressed_handle = None;
        self.seed_crop_window();
    }

    /// Put the window back at its default placement.
    pub fn reset(&mut self) {
        self.reseed_if_initialized();
    }

    pub fn set_guideline_mode(&mut self, mode: GuidelineMode) {
        self.config.guideline_mode = mode;
        self.reseed_if_initialized();
    }

    pub fn set_fixed_aspect_ratio(&mut self, fixed: bool) {
        self.config.fix_aspect_ratio = fixed;
        self.reseed_if_initialized();
    }

    /// Set the horizontal ratio component.
    ///
    /// # Errors
    ///
    /// `CropError::InvalidConfiguration` when `x <= 0`; nothing changes.
    pub fn set_aspect_ratio_x(&mut self, x: i32) -> Result<(), CropError> {
        let ratio = self.aspect_ratio.with_x(x).inspect_err(log_rejected)?;
        self.apply_aspect_ratio(ratio);
        Ok(())
    }

    /// Set the vertical ratio component.
    ///
    /// # Errors
    ///
    /// `CropError::InvalidConfiguration` when `y <= 0`; nothing changes.
    pub fn set_aspect_ratio_y(&mut self, y: i32) -> Result<(), CropError> {
        let ratio = self.aspect_ratio.with_y(y).inspect_err(log_rejected)?;
        self.apply_aspect_ratio(ratio);
        Ok(())
    }

    /// Set both ratio components at once, re-seeding a single time.
    ///
    /// # Errors
    ///
    /// `CropError::InvalidConfiguration` when either component is `<= 0`;
    /// nothing changes.
    pub fn set_aspect_ratio(&mut self, x: i32, y: i32) -> Result<(), CropError> {
        let ratio = AspectRatio::new(x, y).inspect_err(log_rejected)?;
        self.apply_aspect_ratio(ratio);
        Ok(())
    }

    /// Set all initial attributes at once.
    ///
    /// Meant to be called while the host view is being set up, before the
    /// bounding box is known. On an initialized overlay the window is only
    /// re-seeded when the fixed-ratio flag or the ratio actually changes, so
    /// a locked window always has the locked shape.
    ///
    /// # Errors
    ///
    /// `CropError::InvalidConfiguration` when either ratio component is
    /// `<= 0`; nothing changes.
    pub fn set_initial_attribute_values(
        &mut self,
        guideline_mode: GuidelineMode,
        fix_aspect_ratio: bool,
        aspect_ratio_x: i32,
        aspect_ratio_y: i32,
    ) -> Result<(), CropError> {
        let ratio = AspectRatio::new(aspect_ratio_x, aspect_ratio_y)
            .inspect_err(log_rejected)?;
        let shape_changed =
            fix_aspect_ratio != self.config.fix_aspect_ratio || ratio != self.aspect_ratio;

        self.config.guideline_mode = guideline_mode;
        self.config.fix_aspect_ratio = fix_aspect_ratio;
        self.store_aspect_ratio(ratio);
        if shape_changed {
            self.reseed_if_initialized();
        }
        Ok(())
    }

    /// Process one touch event. Returns `true` when the overlay consumed it,
    /// which is always the case while enabled.
    pub fn on_touch(&mut self, event: TouchEvent) -> bool {
        if !self.enabled {
            return false;
        }

        match event {
            TouchEvent::Down { x, y } => {
                self.press(Point::new(x, y));
            }
            TouchEvent::Move { x, y } => {
                self.drag(Point::new(x, y));
            }
            TouchEvent::Up | TouchEvent::Cancel => {
                self.release();
            }
        }
        true
    }

    /// True when guidelines should be drawn right now.
    pub fn shows_guidelines(&self) -> bool {
        match self.config.guideline_mode {
            GuidelineMode::On => true,
            GuidelineMode::OnTouch => self.pressed_handle.is_some(),
            GuidelineMode::Off => false,
        }
    }

    /// Guideline positions dividing the window into thirds, if shown.
    pub fn guidelines(&self) -> Option<Guidelines> {
        if !self.shows_guidelines() {
            return None;
        }
        let edges = &self.edges;
        let third_width = edges.width() / 3.0;
        let third_height = edges.height() / 3.0;
        Some(Guidelines {
            vertical: [edges.left + third_width, edges.right - third_width],
            horizontal: [edges.top + third_height, edges.bottom - third_height],
        })
    }

    /// The parts of the image outside the window, for darkening.
    pub fn surrounding_area(&self) -> SurroundingArea {
        let bounds = &self.bounds;
        let edges = &self.edges;
        SurroundingArea {
            top: BoundingBox::new(bounds.left, bounds.top, bounds.right, edges.top),
            bottom: BoundingBox::new(bounds.left, edges.bottom, bounds.right, bounds.bottom),
            left: BoundingBox::new(bounds.left, edges.top, edges.left, edges.bottom),
            right: BoundingBox::new(edges.right, edges.top, bounds.right, edges.bottom),
        }
    }

    fn press(&mut self, point: Point) {
        self.pressed_handle = pressed_handle(
            point,
            &self.edges,
            self.config.handle_radius,
            self.config.small_rect_threshold,
        );

        match self.pressed_handle {
            Some(handle) => {
                self.touch_offset = touch_offset(handle, point, &self.edges);
                tracing::debug!(
                    handle = handle.as_str(),
                    x = point.x,
                    y = point.y,
                    "handle pressed"
                );
            }
            None => {
                tracing::trace!(x = point.x, y = point.y, "touch missed every handle");
            }
        }
    }

    fn drag(&mut self, point: Point) {
        let Some(handle) = self.pressed_handle else {
            return;
        };
        let adjusted = self.touch_offset.apply(point);
        let constraints = self.constraints();
        handle.update_crop_window(&mut self.edges, adjusted, &constraints);
    }

    fn release(&mut self) {
        if let Some(handle) = self.pressed_handle.take() {
            tracing::debug!(handle = handle.as_str(), "handle released");
        }
    }

    fn apply_aspect_ratio(&mut self, ratio: AspectRatio) {
        self.store_aspect_ratio(ratio);
        self.reseed_if_initialized();
    }

    fn store_aspect_ratio(&mut self, ratio: AspectRatio) {
        self.aspect_ratio = ratio;
        self.config.aspect_ratio_x = ratio.x() as i32;
        self.config.aspect_ratio_y = ratio.y() as i32;
    }

    fn reseed_if_initialized(&mut self) {
        if self.initialized {
            self.seed_crop_window();
        }
    }

    /// Place the window at its default position for the current bounds and
    /// ratio settings.
    fn seed_crop_window(&mut self) {
        self.initialized = true;
        let bounds = self.bounds;
        let min_length = self.config.min_crop_length;

        self.edges = match (bounds.aspect_ratio(), self.target_aspect_ratio()) {
            (None, target) => fallback_window(&bounds, min_length, target.unwrap_or(1.0)),
            (Some(_), None) => {
                let horizontal = INITIAL_PADDING * bounds.width();
                let vertical = INITIAL_PADDING * bounds.height();
                let (left, right) = widen_span(
                    bounds.left + horizontal,
                    bounds.right - horizontal,
                    min_length,
                    bounds.left,
                    bounds.right,
                );
                let (top, bottom) = widen_span(
                    bounds.top + vertical,
                    bounds.bottom - vertical,
                    min_length,
                    bounds.top,
                    bounds.bottom,
                );
                EdgeSet::new(left, top, right, bottom)
            }
            (Some(_), Some(target)) => {
                fitted_window(&bounds, target, min_length)
                    .unwrap_or_else(|| fallback_window(&bounds, min_length, target))
            }
        };

        tracing::debug!(
            left = self.edges.left,
            top = self.edges.top,
            right = self.edges.right,
            bottom = self.edges.bottom,
            fixed = self.config.fix_aspect_ratio,
            "crop window seeded"
        );
    }
}

/// Largest window at `ratio` that fits in `bounds`, centered on it, or `None`
/// when that window is below `min_length` on either axis.
fn fitted_window(bounds: &BoundingBox, ratio: f32, min_length: f32) -> Option<EdgeSet> {
    let box_ratio = bounds.aspect_ratio()?;
    let center = bounds.center();
    let edges = if box_ratio > ratio {
        // Image is wider than the target: full height, centered horizontally.
        let width = aspect::checked_width(bounds.top, bounds.bottom, ratio)?;
        let left = center.x - width / 2.0;
        let mut edges = EdgeSet::new(left, bounds.top, left, bounds.bottom);
        edges.right = aspect::solve_edge(Edge::Right, &edges, ratio);
        edges
    } else {
        let height = aspect::checked_height(bounds.left, bounds.right, ratio)?;
        let top = center.y - height / 2.0;
        let mut edges = EdgeSet::new(bounds.left, top, bounds.right, top);
        edges.bottom = aspect::solve_edge(Edge::Bottom, &edges, ratio);
        edges
    };

    if edges.width() >= min_length && edges.height() >= min_length {
        Some(edges)
    } else {
        None
    }
}

/// Grow `low..high` symmetrically to at least `length`, shifted to stay
/// within `floor..ceiling` when the span fits there.
fn widen_span(low: f32, high: f32, length: f32, floor: f32, ceiling: f32) -> (f32, f32) {
    if high - low >= length {
        return (low, high);
    }
    let center = (low + high) / 2.0;
    let low = clamp_between(center - length / 2.0, floor, ceiling - length);
    (low, low + length)
}

/// Minimum-size window for a box that cannot hold a default one, centered on
/// it when its center is a real point. The shorter side is `min_length`.
fn fallback_window(bounds: &BoundingBox, min_length: f32, ratio: f32) -> EdgeSet {
    tracing::debug!(?bounds, min_length, "bounding box too small, using minimum window");
    let center = bounds.center();
    let center = if center.is_finite() {
        center
    } else {
        Point::default()
    };

    let (width, height) = if ratio >= 1.0 {
        (min_length * ratio, min_length)
    } else {
        (min_length, min_length / ratio)
    };
    EdgeSet::new(
        center.x - width / 2.0,
        center.y - height / 2.0,
        center.x + width / 2.0,
        center.y + height / 2.0,
    )
}

fn log_rejected(err: &CropError) {
    tracing::warn!("rejected crop overlay configuration: {err}");
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const MIN_LENGTH: f32 = 40.0;
    const TOLERANCE: f32 = 1e-2;

    /// Strategy for image bounds large enough to hold any tested ratio.
    fn bounds_strategy() -> impl Strategy<Value = BoundingBox> {
        let origin = (-500.0f32..500.0, -500.0f32..500.0);
        let size = (400.0f32..2000.0, 400.0f32..2000.0);
        (origin, size).prop_map(|((left, top), (width, height))| {
            BoundingBox::new(left, top, left + width, top + height)
        })
    }

    /// Strategy for touch points relative to the image, including outside it.
    fn touch_strategy() -> impl Strategy<Value = (f32, f32)> {
        (-0.3f32..1.3, -0.3f32..1.3)
    }

    /// A gesture: the press point and the moves that follow it.
    fn gesture_strategy() -> impl Strategy<Value = ((f32, f32), Vec<(f32, f32)>)> {
        let moves = prop::collection::vec(touch_strategy(), 1..8);
        (touch_strategy(), moves)
    }

    fn to_view(bounds: &BoundingBox, (u, v): (f32, f32)) -> (f32, f32) {
        (
            bounds.left + u * bounds.width(),
            bounds.top + v * bounds.height(),
        )
    }

    /// Press on a handle by targeting one of the window's anchors, nudged.
    fn press_point(overlay: &CropOverlay, handle_index: usize, nudge: (f32, f32)) -> (f32, f32) {
        let anchor = Handle::ALL[handle_index].anchor(&overlay.edges());
        (anchor.x + nudge.0, anchor.y + nudge.1)
    }

    fn check_invariants(overlay: &CropOverlay) -> Result<(), TestCaseError> {
        let edges = overlay.edges();
        let bounds = overlay.bounding_box();
        prop_assert!(edges.is_finite(), "edges must stay finite: {:?}", edges);
        prop_assert!(
            edges.width() >= MIN_LENGTH - TOLERANCE,
            "width {} below minimum",
            edges.width()
        );
        prop_assert!(
            edges.height() >= MIN_LENGTH - TOLERANCE,
            "height {} below minimum",
            edges.height()
        );
        prop_assert!(
            edges.is_within(&bounds, TOLERANCE),
            "window {:?} escapes bounds {:?}",
            edges,
            bounds
        );
        if let Some(target) = overlay.target_aspect_ratio() {
            let ratio = edges.width() / edges.height();
            prop_assert!(
                ((ratio - target) / target).abs() <= 1e-3,
                "ratio {} drifted from {}",
                ratio,
                target
            );
        }
        Ok(())
    }

    fn run_gestures(
        overlay: &mut CropOverlay,
        gestures: &[(usize, (f32, f32), Vec<(f32, f32)>)],
    ) -> Result<(), TestCaseError> {
        let bounds = overlay.bounding_box();
        for (handle_index, nudge, moves) in gestures {
            let (x, y) = press_point(overlay, *handle_index, *nudge);
            overlay.on_touch(TouchEvent::Down { x, y });
            for &relative in moves {
                let (x, y) = to_view(&bounds, relative);
                overlay.on_touch(TouchEvent::Move { x, y });
                check_invariants(overlay)?;
            }
            overlay.on_touch(TouchEvent::Up);
        }
        Ok(())
    }

    /// Gestures as (handle index, press nudge, relative moves).
    type HandleGestures = Vec<(usize, (f32, f32), Vec<(f32, f32)>)>;

    fn handle_gesture_strategy() -> impl Strategy<Value = HandleGestures> {
        prop::collection::vec(
            (
                0usize..9,
                (-10.0f32..10.0, -10.0f32..10.0),
                prop::collection::vec(touch_strategy(), 1..6),
            ),
            1..6,
        )
    }

    proptest! {
        /// Property: free windows stay inside the image and above the minimum size.
        #[test]
        fn prop_free_drags_keep_invariants(
            bounds in bounds_strategy(),
            gestures in handle_gesture_strategy(),
        ) {
            let mut overlay = CropOverlay::new(OverlayConfig::default()).unwrap();
            overlay.set_bounding_box(bounds);
            check_invariants(&overlay)?;
            run_gestures(&mut overlay, &gestures)?;
        }

        /// Property: ratio-locked windows also keep their ratio.
        #[test]
        fn prop_fixed_drags_keep_ratio(
            bounds in bounds_strategy(),
            ratio_x in 1i32..=5,
            ratio_y in 1i32..=5,
            gestures in handle_gesture_strategy(),
        ) {
            let config = OverlayConfig {
                fix_aspect_ratio: true,
                aspect_ratio_x: ratio_x,
                aspect_ratio_y: ratio_y,
                ..OverlayConfig::default()
            };
            let mut overlay = CropOverlay::new(config).unwrap();
            overlay.set_bounding_box(bounds);
            check_invariants(&overlay)?;
            run_gestures(&mut overlay, &gestures)?;
        }

        /// Property: arbitrary touches (hits and misses alike) never break the window.
        #[test]
        fn prop_random_touches_keep_invariants(
            bounds in bounds_strategy(),
            fixed in any::<bool>(),
            gestures in prop::collection::vec(gesture_strategy(), 1..6),
        ) {
            let config = OverlayConfig {
                fix_aspect_ratio: fixed,
                aspect_ratio_x: 3,
                aspect_ratio_y: 2,
                ..OverlayConfig::default()
            };
            let mut overlay = CropOverlay::new(config).unwrap();
            overlay.set_bounding_box(bounds);

            for (press, moves) in gestures {
                let (x, y) = to_view(&bounds, press);
                overlay.on_touch(TouchEvent::Down { x, y });
                for relative in moves {
                    let (x, y) = to_view(&bounds, relative);
                    overlay.on_touch(TouchEvent::Move { x, y });
                    check_invariants(&overlay)?;
                }
                overlay.on_touch(TouchEvent::Up);
            }
        }

        /// Property: touching exactly on a corner grabs that corner.
        #[test]
        fn prop_corner_classification_is_reflexive(
            left in -500.0f32..500.0,
            top in -500.0f32..500.0,
            width in 1.0f32..1000.0,
            height in 1.0f32..1000.0,
            radius in 0.1f32..60.0,
        ) {
            let edges = EdgeSet::new(left, top, left + width, top + height);
            for handle in Handle::CORNERS {
                let anchor = handle.anchor(&edges);
                prop_assert_eq!(
                    pressed_handle(anchor, &edges, radius, crate::handle::SMALL_RECT_THRESHOLD),
                    Some(handle)
                );
            }
        }

        /// Property: rejected ratios never change the window or the stored ratio.
        #[test]
        fn prop_invalid_ratio_rejected(
            bounds in bounds_strategy(),
            bad in -100i32..=0,
        ) {
            let mut overlay = CropOverlay::new(OverlayConfig::default()).unwrap();
            overlay.set_bounding_box(bounds);
            let edges = overlay.edges();
            let ratio = overlay.aspect_ratio();

            prop_assert!(overlay.set_aspect_ratio_x(bad).is_err());
            prop_assert!(overlay.set_aspect_ratio_y(bad).is_err());
            prop_assert_eq!(overlay.edges(), edges);
            prop_assert_eq!(overlay.aspect_ratio(), ratio);
        }
    }
}
