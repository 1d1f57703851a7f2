//! Translates window pointer input into pan events for the label.

use grablabel_core::{LabelWidget, PanEvent, PanTracker};
use kurbo::Point;

/// Mouse-driven pan recognizer.
///
/// A press inside the label begins a pan; the cursor offset from the press
/// position is reported as the cumulative translation, the way touch pan
/// recognizers do.
#[derive(Debug, Default)]
pub struct EventHandler {
    tracker: PanTracker,
    /// Press position in window coordinates while a pan is active.
    press_origin: Option<Point>,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a pan is in progress.
    pub fn is_dragging(&self) -> bool {
        self.press_origin.is_some()
    }

    /// Primary button pressed at `position` (window coordinates).
    pub fn pointer_pressed(&mut self, position: Point, widget: &mut LabelWidget) -> bool {
        if !widget.contains(position) {
            return false;
        }
        self.press_origin = Some(position);
        let local = widget.geometry().to_local(position);
        self.tracker.handle_event(PanEvent::Began { touches: vec![local] }, widget)
    }

    /// Cursor moved to `position` (window coordinates).
    pub fn pointer_moved(&mut self, position: Point, widget: &mut LabelWidget) -> bool {
        let Some(origin) = self.press_origin else {
            return false;
        };
        self.tracker.handle_event(
            PanEvent::Changed {
                touches: 1,
                translation: position - origin,
            },
            widget,
        )
    }

    /// Primary button released.
    pub fn pointer_released(&mut self, widget: &mut LabelWidget) -> bool {
        if self.press_origin.take().is_none() {
            return false;
        }
        self.tracker.handle_event(PanEvent::Ended, widget)
    }

    /// Pointer lost (left the window or focus changed) mid-drag.
    pub fn pointer_cancelled(&mut self, widget: &mut LabelWidget) -> bool {
        if self.press_origin.take().is_none() {
            return false;
        }
        self.tracker.handle_event(PanEvent::Cancelled, widget)
    }
}
