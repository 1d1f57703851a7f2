//! Label geometry and the drag update rules.
//!
//! The frame is the single source of truth for layout. Everything else
//! (handle position, border, text area) is derived from it on demand.

use crate::gesture::DragMode;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Side length of the visible resize handle.
pub const HANDLE_SIZE: f64 = 20.0;
/// Inset of the text area from the top-left edges.
pub const TEXT_MARGIN: f64 = 5.0;
/// Smallest width a resize is allowed to start shrinking from.
pub const MIN_WIDTH: f64 = 60.0;
/// Smallest height a resize is allowed to start shrinking from.
pub const MIN_HEIGHT: f64 = 40.0;
/// Distance kept between the label's size ceiling and the screen size.
pub const SCREEN_MARGIN: f64 = 20.0;

/// Frame of a label in its container's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelGeometry {
    pub frame: Rect,
}

impl LabelGeometry {
    pub const DEFAULT_SIZE: Size = Size::new(200.0, 80.0);

    pub fn new(origin: Point, size: Size) -> Self {
        Self {
            frame: Rect::from_origin_size(origin, size),
        }
    }

    pub fn width(&self) -> f64 {
        self.frame.width()
    }

    pub fn height(&self) -> f64 {
        self.frame.height()
    }

    pub fn size(&self) -> Size {
        self.frame.size()
    }

    pub fn origin(&self) -> Point {
        self.frame.origin()
    }

    pub fn center(&self) -> Point {
        self.frame.center()
    }

    /// Bounds in the label's own coordinate space (origin at zero).
    pub fn local_bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.size())
    }

    /// Top-left corner of the resize handle, in local coordinates.
    pub fn handle_position(&self) -> Point {
        Point::new(self.width() - HANDLE_SIZE, self.height() - HANDLE_SIZE)
    }

    /// Convert a point from the container's space into local coordinates.
    pub fn to_local(&self, point: Point) -> Point {
        point - self.origin().to_vec2()
    }

    fn with_width(mut self, width: f64) -> Self {
        self.frame.x1 = self.frame.x0 + width;
        self
    }

    fn with_height(mut self, height: f64) -> Self {
        self.frame.y1 = self.frame.y0 + height;
        self
    }
}

impl Default for LabelGeometry {
    fn default() -> Self {
        Self::new(Point::ZERO, Self::DEFAULT_SIZE)
    }
}

/// Size guards applied while resizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeLimits {
    pub min_width: f64,
    pub min_height: f64,
    pub max_width: f64,
    pub max_height: f64,
}

impl ResizeLimits {
    /// Limits for a screen of the given size.
    pub fn for_screen(screen: Size) -> Self {
        Self {
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
            max_width: screen.width - SCREEN_MARGIN,
            max_height: screen.height - SCREEN_MARGIN,
        }
    }

    /// Whether a horizontal delta may be applied at the current width.
    ///
    /// Shrinking needs room above the floor, growing needs room below the
    /// ceiling. The check happens before the delta is applied, so one large
    /// delta can still cross a bound.
    pub fn accepts_width_delta(&self, width: f64, dx: f64) -> bool {
        (width > self.min_width || dx > 0.0) && (width < self.max_width || dx < 0.0)
    }

    /// Whether a vertical delta may be applied at the current height.
    ///
    /// Unlike the width rule, growth is always accepted and shrinking is only
    /// accepted while the height lies strictly inside both bounds.
    pub fn accepts_height_delta(&self, height: f64, dy: f64) -> bool {
        (height > self.min_height && height < self.max_height) || dy > 0.0
    }
}

/// Outcome of applying one drag delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryUpdate {
    /// Geometry after the delta.
    pub geometry: LabelGeometry,
    pub width_changed: bool,
    pub height_changed: bool,
    pub moved: bool,
}

impl GeometryUpdate {
    fn unchanged(geometry: LabelGeometry) -> Self {
        Self {
            geometry,
            width_changed: false,
            height_changed: false,
            moved: false,
        }
    }

    /// Whether anything about the frame changed.
    pub fn changed(&self) -> bool {
        self.width_changed || self.height_changed || self.moved
    }
}

/// Apply one incremental drag delta to `geometry`.
///
/// In [`DragMode::Resize`] each axis is guarded independently by `limits`; a
/// rejected axis keeps its size. In [`DragMode::Move`] the frame is
/// translated without any bound. Non-finite deltas leave the geometry as is.
pub fn apply_drag(
    geometry: LabelGeometry,
    mode: DragMode,
    delta: Vec2,
    limits: &ResizeLimits,
) -> GeometryUpdate {
    if !delta.is_finite() {
        return GeometryUpdate::unchanged(geometry);
    }

    match mode {
        DragMode::Move => {
            let moved = delta != Vec2::ZERO;
            GeometryUpdate {
                geometry: LabelGeometry {
                    frame: geometry.frame + delta,
                },
                width_changed: false,
                height_changed: false,
                moved,
            }
        }
        DragMode::Resize => {
            let mut next = geometry;
            let mut width_changed = false;
            let mut height_changed = false;

            let width = geometry.width();
            if limits.accepts_width_delta(width, delta.x) && delta.x != 0.0 {
                next = next.with_width(width + delta.x);
                width_changed = true;
            }

            let height = geometry.height();
            if limits.accepts_height_delta(height, delta.y) && delta.y != 0.0 {
                next = next.with_height(height + delta.y);
                height_changed = true;
            }

            GeometryUpdate {
                geometry: next,
                width_changed,
                height_changed,
                moved: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen_limits() -> ResizeLimits {
        ResizeLimits::for_screen(Size::new(400.0, 300.0))
    }

    fn sized(width: f64, height: f64) -> LabelGeometry {
        LabelGeometry::new(Point::new(10.0, 10.0), Size::new(width, height))
    }

    #[test]
    fn test_limits_for_screen() {
        let limits = screen_limits();
        assert!((limits.max_width - 380.0).abs() < f64::EPSILON);
        assert!((limits.max_height - 280.0).abs() < f64::EPSILON);
        assert!((limits.min_width - 60.0).abs() < f64::EPSILON);
        assert!((limits.min_height - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_floor_rejects_shrink() {
        let update = apply_drag(sized(60.0, 80.0), DragMode::Resize, Vec2::new(-5.0, 0.0), &screen_limits());
        assert!(!update.width_changed);
        assert!((update.geometry.width() - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_floor_allows_growth() {
        let update = apply_drag(sized(60.0, 80.0), DragMode::Resize, Vec2::new(5.0, 0.0), &screen_limits());
        assert!(update.width_changed);
        assert!((update.geometry.width() - 65.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_ceiling_rejects_growth() {
        let update = apply_drag(sized(380.0, 80.0), DragMode::Resize, Vec2::new(5.0, 0.0), &screen_limits());
        assert!(!update.width_changed);
        assert!((update.geometry.width() - 380.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_ceiling_allows_shrink() {
        let update = apply_drag(sized(380.0, 80.0), DragMode::Resize, Vec2::new(-5.0, 0.0), &screen_limits());
        assert!(update.width_changed);
        assert!((update.geometry.width() - 375.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_large_delta_crosses_floor() {
        // Guards run before the delta, so a single big step lands below the floor.
        let limits = screen_limits();
        let update = apply_drag(sized(100.0, 80.0), DragMode::Resize, Vec2::new(-50.0, -50.0), &limits);
        assert!((update.geometry.width() - 50.0).abs() < f64::EPSILON);
        assert!((update.geometry.height() - 30.0).abs() < f64::EPSILON);

        // Below the floor, further shrinking is rejected on both axes.
        let next = apply_drag(update.geometry, DragMode::Resize, Vec2::new(-5.0, -5.0), &limits);
        assert!(!next.changed());
        assert!((next.geometry.width() - 50.0).abs() < f64::EPSILON);
        assert!((next.geometry.height() - 30.0).abs() < f64::EPSILON);

        // Growing back is still allowed.
        let grown = apply_drag(next.geometry, DragMode::Resize, Vec2::new(5.0, 5.0), &limits);
        assert!((grown.geometry.width() - 55.0).abs() < f64::EPSILON);
        assert!((grown.geometry.height() - 35.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_height_grows_past_ceiling() {
        // Height growth is unconditional, unlike width.
        let update = apply_drag(sized(100.0, 280.0), DragMode::Resize, Vec2::new(0.0, 5.0), &screen_limits());
        assert!(update.height_changed);
        assert!((update.geometry.height() - 285.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_height_shrink_rejected_at_ceiling() {
        let update = apply_drag(sized(100.0, 280.0), DragMode::Resize, Vec2::new(0.0, -5.0), &screen_limits());
        assert!(!update.height_changed);
        assert!((update.geometry.height() - 280.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_height_floor() {
        let limits = screen_limits();
        let shrink = apply_drag(sized(100.0, 40.0), DragMode::Resize, Vec2::new(0.0, -5.0), &limits);
        assert!(!shrink.height_changed);
        let grow = apply_drag(sized(100.0, 40.0), DragMode::Resize, Vec2::new(0.0, 5.0), &limits);
        assert!((grow.geometry.height() - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_keeps_origin() {
        let update = apply_drag(sized(100.0, 80.0), DragMode::Resize, Vec2::new(10.0, 10.0), &screen_limits());
        assert_eq!(update.geometry.origin(), Point::new(10.0, 10.0));
        assert!(!update.moved);
    }

    #[test]
    fn test_handle_tracks_frame() {
        let limits = screen_limits();
        let mut geometry = sized(100.0, 80.0);
        for delta in [Vec2::new(12.0, -7.0), Vec2::new(-3.5, 20.0), Vec2::new(40.0, 0.25)] {
            geometry = apply_drag(geometry, DragMode::Resize, delta, &limits).geometry;
            let handle = geometry.handle_position();
            assert!((handle.x - (geometry.width() - HANDLE_SIZE)).abs() < f64::EPSILON);
            assert!((handle.y - (geometry.height() - HANDLE_SIZE)).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_move_is_unbounded() {
        let update = apply_drag(sized(100.0, 80.0), DragMode::Move, Vec2::new(-500.0, -600.0), &screen_limits());
        assert!(update.moved);
        assert_eq!(update.geometry.origin(), Point::new(-490.0, -590.0));
        assert_eq!(update.geometry.size(), Size::new(100.0, 80.0));
        assert_eq!(update.geometry.center(), Point::new(-440.0, -550.0));
    }

    #[test]
    fn test_non_finite_delta_rejected() {
        let geometry = sized(100.0, 80.0);
        for delta in [
            Vec2::new(f64::NAN, 0.0),
            Vec2::new(0.0, f64::INFINITY),
            Vec2::new(f64::NEG_INFINITY, f64::NAN),
        ] {
            for mode in [DragMode::Move, DragMode::Resize] {
                let update = apply_drag(geometry, mode, delta, &screen_limits());
                assert!(!update.changed());
                assert_eq!(update.geometry, geometry);
            }
        }
    }

    #[test]
    fn test_to_local() {
        let geometry = sized(100.0, 80.0);
        assert_eq!(geometry.to_local(Point::new(105.0, 85.0)), Point::new(95.0, 75.0));
    }
}
