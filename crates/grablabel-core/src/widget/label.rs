//! The label widget: configuration surface, drag handling and redraw requests.

use super::handles::ResizeHandle;
use super::state::WidgetState;
use crate::config::{ConfigResult, LabelConfig};
use crate::geometry::{LabelGeometry, ResizeLimits, apply_drag};
use crate::gesture::{DragHandler, GesturePhase};
use crate::style::{LabelColor, LabelFont, LabelStyle, StyleResult, validate_stroke_width};
use kurbo::{Point, Rect, Size, Vec2};

/// A movable, resizable text label.
#[derive(Debug, Clone)]
pub struct LabelWidget {
    state: WidgetState,
    screen_size: Size,
    limits: ResizeLimits,
    /// Set by any visible change, cleared when the host paints.
    redraw_requested: bool,
}

impl Default for LabelWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelWidget {
    pub const DEFAULT_SCREEN_SIZE: Size = Size::new(1280.0, 800.0);

    /// Create a label with default text, style and frame.
    pub fn new() -> Self {
        Self::with_state(WidgetState::default(), Self::DEFAULT_SCREEN_SIZE)
    }

    /// Create a label occupying `frame`.
    pub fn with_frame(frame: Rect) -> Self {
        let mut widget = Self::new();
        widget.state.geometry = LabelGeometry { frame };
        widget
    }

    /// Create a label from a configuration.
    pub fn from_config(config: &LabelConfig) -> ConfigResult<Self> {
        let state = WidgetState {
            geometry: config.geometry()?,
            text: config.text.clone(),
            style: config.style()?,
            ..WidgetState::default()
        };
        Ok(Self::with_state(state, config.screen_size()?))
    }

    fn with_state(state: WidgetState, screen_size: Size) -> Self {
        Self {
            state,
            screen_size,
            limits: ResizeLimits::for_screen(screen_size),
            // First paint is always needed.
            redraw_requested: true,
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn geometry(&self) -> &LabelGeometry {
        &self.state.geometry
    }

    pub fn frame(&self) -> Rect {
        self.state.geometry.frame
    }

    pub fn text(&self) -> &str {
        &self.state.text
    }

    pub fn style(&self) -> &LabelStyle {
        &self.state.style
    }

    pub fn phase(&self) -> GesturePhase {
        self.state.phase()
    }

    pub fn is_resizing(&self) -> bool {
        self.state.is_resizing()
    }

    pub fn handle(&self) -> ResizeHandle {
        self.state.handle()
    }

    pub fn screen_size(&self) -> Size {
        self.screen_size
    }

    pub fn limits(&self) -> &ResizeLimits {
        &self.limits
    }

    /// Whether the container point lies inside the label.
    pub fn contains(&self, point: Point) -> bool {
        self.frame().contains(point)
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.state.text = text.into();
        self.request_redraw();
    }

    pub fn set_fill_color(&mut self, color: LabelColor) {
        self.state.style.fill_color = color;
        self.request_redraw();
    }

    pub fn set_stroke_color(&mut self, color: LabelColor) {
        self.state.style.stroke_color = color;
        self.request_redraw();
    }

    pub fn set_stroke_width(&mut self, width: f64) -> StyleResult<()> {
        self.state.style.stroke_width = validate_stroke_width(width)?;
        self.request_redraw();
        Ok(())
    }

    pub fn set_font(&mut self, font: LabelFont) -> StyleResult<()> {
        font.validate()?;
        self.state.style.font = font;
        self.request_redraw();
        Ok(())
    }

    pub fn set_accent_color(&mut self, color: LabelColor) {
        self.state.style.accent_color = color;
        self.request_redraw();
    }

    /// Replace the whole style at once.
    pub fn set_style(&mut self, style: LabelStyle) -> StyleResult<()> {
        style.validate()?;
        self.state.style = style;
        self.request_redraw();
        Ok(())
    }

    /// Assign a frame from host layout. Non-finite frames are ignored.
    pub fn set_frame(&mut self, frame: Rect) {
        if !frame.is_finite() {
            log::debug!("Ignoring non-finite frame {:?}", frame);
            return;
        }
        self.state.geometry.frame = frame;
        self.request_redraw();
    }

    /// Update the screen size, which bounds resizing.
    pub fn set_screen_size(&mut self, size: Size) {
        if !(size.is_finite() && size.width > 0.0 && size.height > 0.0) {
            log::debug!("Ignoring invalid screen size {:?}", size);
            return;
        }
        self.screen_size = size;
        self.limits = ResizeLimits::for_screen(size);
    }

    /// Ask for a repaint. Multiple requests before the next paint coalesce.
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw_requested
    }

    /// Consume the pending redraw request, if any.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}

impl DragHandler for LabelWidget {
    fn on_drag_start(&mut self, location: Point) {
        let size = self.state.geometry.size();
        if let Some(mode) = self.state.router.begin(location, size) {
            log::debug!("Drag started at {:?} as {:?}", location, mode);
        }
    }

    fn on_drag_move(&mut self, delta: Vec2) {
        let Some(mode) = self.state.phase().mode() else {
            log::debug!("Ignoring drag movement while idle");
            return;
        };
        if !delta.is_finite() {
            log::debug!("Ignoring non-finite drag delta {:?}", delta);
            return;
        }

        let update = apply_drag(self.state.geometry, mode, delta, &self.limits);
        if update.changed() {
            self.state.geometry = update.geometry;
            self.request_redraw();
        }
    }

    fn on_drag_end(&mut self) {
        self.state.router.end();
    }
}
