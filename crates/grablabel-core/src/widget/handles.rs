//! The bottom-right resize handle.

use crate::geometry::{HANDLE_SIZE, LabelGeometry};
use kurbo::{Circle, Point, Rect, Size};

/// Resize handle of a label, in the label's local coordinates.
///
/// Always derived from the current geometry; never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeHandle {
    /// Top-left corner of the visible handle.
    pub position: Point,
}

impl ResizeHandle {
    pub fn for_geometry(geometry: &LabelGeometry) -> Self {
        Self {
            position: geometry.handle_position(),
        }
    }

    /// Area of the visible handle.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, Size::new(HANDLE_SIZE, HANDLE_SIZE))
    }

    /// Filled dot drawn for the handle.
    pub fn circle(&self) -> Circle {
        Circle::new(self.rect().center(), HANDLE_SIZE / 2.0)
    }
}
