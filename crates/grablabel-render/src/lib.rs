//! GrabLabel Render Library
//!
//! Turns label state into drawable artifacts. [`LabelScene`] is the
//! backend-independent description; the optional Vello backend paints it.

mod renderer;
pub mod scene;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{LabelRenderer, RenderContext, RenderResult, RendererError, SceneRecorder};
pub use scene::{BorderArtifact, DashedStroke, HandleArtifact, LabelScene, SceneLayer, TextLayout};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloLabelRenderer;
