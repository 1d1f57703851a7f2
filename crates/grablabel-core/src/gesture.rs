//! Gesture routing: decide whether a touch sequence moves or resizes.

use crate::geometry::HANDLE_SIZE;
use kurbo::{Point, Size, Vec2};

/// What a drag sequence does to the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Translate the whole label.
    Move,
    /// Change the label's size from the bottom-right corner.
    Resize,
}

/// Phase of the current touch sequence.
///
/// Classification happens synchronously on touch-down, so there is no
/// observable phase between `Idle` and `Moving`/`Resizing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No touch sequence active.
    #[default]
    Idle,
    /// Sequence started outside the handle zone.
    Moving,
    /// Sequence started inside the handle zone.
    Resizing,
}

impl GesturePhase {
    /// Drag mode for the phase, `None` while idle.
    pub fn mode(self) -> Option<DragMode> {
        match self {
            Self::Idle => None,
            Self::Moving => Some(DragMode::Move),
            Self::Resizing => Some(DragMode::Resize),
        }
    }
}

impl From<DragMode> for GesturePhase {
    fn from(mode: DragMode) -> Self {
        match mode {
            DragMode::Move => Self::Moving,
            DragMode::Resize => Self::Resizing,
        }
    }
}

/// Classify a touch-down location (local coordinates) against the label size.
///
/// The resize zone is a square at the bottom-right corner, twice the size of
/// the visible handle.
pub fn classify(location: Point, size: Size) -> DragMode {
    let zone = HANDLE_SIZE * 2.0;
    if location.x > size.width - zone && location.y > size.height - zone {
        DragMode::Resize
    } else {
        DragMode::Move
    }
}

/// Latches the classification of the active touch sequence.
#[derive(Debug, Clone, Default)]
pub struct GestureRouter {
    phase: GesturePhase,
}

impl GestureRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_resizing(&self) -> bool {
        self.phase == GesturePhase::Resizing
    }

    /// Start (or restart) a sequence at `location`.
    ///
    /// Returns the latched mode, or `None` if the location is not finite. An
    /// unclassifiable touch-down still starts a new sequence, so any latch
    /// from the previous one is dropped.
    pub fn begin(&mut self, location: Point, size: Size) -> Option<DragMode> {
        if !location.is_finite() {
            log::debug!("Ignoring touch-down at non-finite location {:?}", location);
            self.phase = GesturePhase::Idle;
            return None;
        }
        let mode = classify(location, size);
        if self.phase != GesturePhase::Idle {
            log::debug!("Touch-down during an active gesture, reclassifying");
        }
        self.phase = mode.into();
        Some(mode)
    }

    /// End the sequence, however it ended.
    pub fn end(&mut self) {
        self.phase = GesturePhase::Idle;
    }
}

/// Host-facing drag interface.
///
/// Hosts translate their own pointer or touch events into these calls.
pub trait DragHandler {
    /// First contact of a sequence, in the handler's local coordinates.
    fn on_drag_start(&mut self, location: Point);

    /// Translation since the previous call (not since the sequence began).
    fn on_drag_move(&mut self, delta: Vec2);

    /// Sequence ended or was cancelled.
    fn on_drag_end(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_handle_corner() {
        let size = Size::new(100.0, 80.0);
        assert_eq!(classify(Point::new(95.0, 75.0), size), DragMode::Resize);
    }

    #[test]
    fn test_classify_top_left() {
        assert_eq!(classify(Point::new(5.0, 5.0), Size::new(100.0, 80.0)), DragMode::Move);
        assert_eq!(classify(Point::new(5.0, 5.0), Size::new(60.0, 40.0)), DragMode::Move);
    }

    #[test]
    fn test_classify_zone_edges_are_exclusive() {
        let size = Size::new(100.0, 80.0);
        // Zone starts strictly after width - 40 and height - 40.
        assert_eq!(classify(Point::new(60.0, 75.0), size), DragMode::Move);
        assert_eq!(classify(Point::new(95.0, 40.0), size), DragMode::Move);
        assert_eq!(classify(Point::new(60.5, 40.5), size), DragMode::Resize);
    }

    #[test]
    fn test_classify_needs_both_axes() {
        let size = Size::new(100.0, 80.0);
        assert_eq!(classify(Point::new(95.0, 5.0), size), DragMode::Move);
        assert_eq!(classify(Point::new(5.0, 75.0), size), DragMode::Move);
    }

    #[test]
    fn test_router_latches_and_resets() {
        let size = Size::new(100.0, 80.0);
        let mut router = GestureRouter::new();
        assert_eq!(router.phase(), GesturePhase::Idle);

        assert_eq!(router.begin(Point::new(95.0, 75.0), size), Some(DragMode::Resize));
        assert!(router.is_resizing());

        router.end();
        assert_eq!(router.phase(), GesturePhase::Idle);
        assert!(!router.is_resizing());
    }

    #[test]
    fn test_router_no_stale_resize_after_move() {
        let size = Size::new(100.0, 80.0);
        let mut router = GestureRouter::new();

        router.begin(Point::new(5.0, 5.0), size);
        assert_eq!(router.phase(), GesturePhase::Moving);
        router.end();

        router.begin(Point::new(95.0, 75.0), size);
        assert_eq!(router.phase(), GesturePhase::Resizing);
    }

    #[test]
    fn test_router_restart_reclassifies() {
        let size = Size::new(100.0, 80.0);
        let mut router = GestureRouter::new();
        router.begin(Point::new(95.0, 75.0), size);
        router.begin(Point::new(5.0, 5.0), size);
        assert_eq!(router.phase(), GesturePhase::Moving);
    }

    #[test]
    fn test_router_non_finite_location_clears_latch() {
        let size = Size::new(100.0, 80.0);
        let mut router = GestureRouter::new();
        router.begin(Point::new(95.0, 75.0), size);
        assert_eq!(router.begin(Point::new(f64::NAN, 5.0), size), None);
        assert_eq!(router.phase(), GesturePhase::Idle);
        assert!(!router.is_resizing());
    }

    #[test]
    fn test_phase_mode() {
        assert_eq!(GesturePhase::Idle.mode(), None);
        assert_eq!(GesturePhase::Moving.mode(), Some(DragMode::Move));
        assert_eq!(GesturePhase::Resizing.mode(), Some(DragMode::Resize));
    }
}
