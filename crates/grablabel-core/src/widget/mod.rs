//! The interactive label widget.
//!
//! This module ties the pieces together:
//! - [`WidgetState`] holds the frame, text, style and gesture phase
//! - [`ResizeHandle`] is derived from the frame on demand
//! - [`LabelWidget`] routes drag events and coalesces redraw requests
//!
//! The widget is single-threaded: every mutation happens synchronously inside
//! a host callback and a paint always sees the last committed state.

mod handles;
mod label;
mod state;

pub use handles::ResizeHandle;
pub use label::LabelWidget;
pub use state::{DEFAULT_TEXT, WidgetState};
