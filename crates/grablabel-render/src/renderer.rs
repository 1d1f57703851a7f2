//! Renderer trait abstraction.

use crate::scene::LabelScene;
use grablabel_core::LabelWidget;
use kurbo::{Affine, Vec2};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Font error: {0}")]
    Font(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The label to render.
    pub widget: &'a LabelWidget,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color.
    pub background_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(widget: &'a LabelWidget) -> Self {
        Self {
            widget,
            scale_factor: 1.0,
            background_color: Color::from_rgba8(250, 250, 250, 255),
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Transform from the label's local space to device pixels.
    pub fn transform(&self) -> Affine {
        let origin = self.widget.geometry().origin();
        Affine::scale(self.scale_factor) * Affine::translate(Vec2::new(origin.x, origin.y))
    }
}

/// Trait for rendering backends.
pub trait LabelRenderer {
    /// Rebuild all drawing commands for the frame.
    ///
    /// Called on every paint; implementations must not keep partial state
    /// from the previous frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

/// Renderer that only records the backend-independent scene.
///
/// Useful for hosts that draw with their own graphics stack.
#[derive(Debug, Default)]
pub struct SceneRecorder {
    scene: Option<LabelScene>,
    transform: Affine,
}

impl SceneRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene produced by the last [`LabelRenderer::build_scene`] call.
    pub fn scene(&self) -> Option<&LabelScene> {
        self.scene.as_ref()
    }

    /// Local-to-device transform of the last frame.
    pub fn transform(&self) -> Affine {
        self.transform
    }
}

impl LabelRenderer for SceneRecorder {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene = Some(LabelScene::build(ctx.widget.state()));
        self.transform = ctx.transform();
    }
}
