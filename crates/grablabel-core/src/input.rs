//! Pan gesture adapter.
//!
//! Hosts typically report a pan as a cumulative translation since the gesture
//! began, along with the number of touches currently down. [`PanTracker`]
//! turns that stream into the incremental calls of a [`DragHandler`].

use crate::gesture::DragHandler;
use kurbo::{Point, Vec2};

/// Pan event as delivered by a host gesture recognizer.
#[derive(Debug, Clone, PartialEq)]
pub enum PanEvent {
    /// Gesture began. `touches` are the active contact points in the
    /// widget's local coordinates; the first one drives classification.
    Began { touches: Vec<Point> },
    /// Gesture moved. `translation` is cumulative since `Began`.
    Changed { touches: usize, translation: Vec2 },
    /// Gesture moved. `delta` is already incremental.
    Delta { touches: usize, delta: Vec2 },
    /// Gesture finished normally.
    Ended,
    /// Gesture was cancelled by the host.
    Cancelled,
}

/// Tracks the translation already consumed by the current pan.
#[derive(Debug, Clone, Default)]
pub struct PanTracker {
    /// Cumulative translation at the last forwarded event.
    consumed: Vec2,
    /// Whether a pan is in progress.
    active: bool,
}

impl PanTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a pan is currently in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Feed one host event. Returns `true` if it was forwarded to `handler`.
    pub fn handle_event<H: DragHandler + ?Sized>(&mut self, event: PanEvent, handler: &mut H) -> bool {
        match event {
            PanEvent::Began { touches } => {
                let Some(&location) = touches.first() else {
                    log::debug!("Ignoring pan start without touches");
                    return false;
                };
                self.consumed = Vec2::ZERO;
                // Forwarded even when unusable so the handler drops its old
                // classification; movement stays blocked until a valid start.
                self.active = location.is_finite();
                handler.on_drag_start(location);
                self.active
            }
            PanEvent::Changed { touches, translation } => {
                if !self.accepts(touches, translation) {
                    return false;
                }
                let delta = translation - self.consumed;
                self.consumed = translation;
                handler.on_drag_move(delta);
                true
            }
            PanEvent::Delta { touches, delta } => {
                if !self.accepts(touches, delta) {
                    return false;
                }
                handler.on_drag_move(delta);
                true
            }
            PanEvent::Ended | PanEvent::Cancelled => {
                self.active = false;
                self.consumed = Vec2::ZERO;
                handler.on_drag_end();
                true
            }
        }
    }

    fn accepts(&self, touches: usize, value: Vec2) -> bool {
        if !self.active {
            log::debug!("Ignoring pan movement outside of a gesture");
            return false;
        }
        if touches == 0 {
            log::debug!("Ignoring pan movement without touches");
            return false;
        }
        if !value.is_finite() {
            log::debug!("Ignoring non-finite pan translation {:?}", value);
            return false;
        }
        true
    }
}
