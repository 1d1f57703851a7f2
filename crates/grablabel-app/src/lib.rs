//! GrabLabel Application
//!
//! Native window hosting a single label widget: pointer input, redraw
//! scheduling and Vello presentation.

mod app;
mod event_handler;

pub use app::{App, AppConfig, AppError};
pub use event_handler::EventHandler;
