//! GrabLabel Core Library
//!
//! Platform-agnostic state and interaction logic for a text label that can
//! be dragged to move it and resized from a bottom-right handle.

pub mod config;
pub mod geometry;
pub mod gesture;
pub mod input;
pub mod style;
pub mod widget;

pub use config::{ConfigError, ConfigResult, LabelConfig};
pub use geometry::{
    GeometryUpdate, HANDLE_SIZE, LabelGeometry, MIN_HEIGHT, MIN_WIDTH, ResizeLimits, SCREEN_MARGIN,
    TEXT_MARGIN, apply_drag,
};
pub use gesture::{DragHandler, DragMode, GesturePhase, GestureRouter, classify};
pub use input::{PanEvent, PanTracker};
pub use style::{FontSource, LabelColor, LabelFont, LabelStyle, StyleError, StyleResult};
pub use widget::{LabelWidget, ResizeHandle, WidgetState};
