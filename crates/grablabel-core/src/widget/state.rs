//! Widget state definitions.

use crate::geometry::LabelGeometry;
use crate::gesture::{GesturePhase, GestureRouter};
use crate::style::LabelStyle;
use super::handles::ResizeHandle;

/// Text shown by a freshly created label.
pub const DEFAULT_TEXT: &str = "SampleText";

/// Everything a label owns.
#[derive(Debug, Clone)]
pub struct WidgetState {
    /// Frame in the container's coordinate space.
    pub geometry: LabelGeometry,
    /// Text content.
    pub text: String,
    /// Presentational properties.
    pub style: LabelStyle,
    /// Classification of the active touch sequence.
    pub(crate) router: GestureRouter,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            geometry: LabelGeometry::default(),
            text: DEFAULT_TEXT.to_string(),
            style: LabelStyle::default(),
            router: GestureRouter::new(),
        }
    }
}

impl WidgetState {
    /// Current gesture phase.
    pub fn phase(&self) -> GesturePhase {
        self.router.phase()
    }

    /// Whether the active touch sequence resizes the label.
    pub fn is_resizing(&self) -> bool {
        self.router.is_resizing()
    }

    /// Resize handle derived from the current frame.
    pub fn handle(&self) -> ResizeHandle {
        ResizeHandle::for_geometry(&self.geometry)
    }
}
