//! Backend-independent render artifacts for a label.
//!
//! A [`LabelScene`] is rebuilt from scratch on every redraw. Backends only
//! translate it into their own drawing commands.

use grablabel_core::geometry::{HANDLE_SIZE, TEXT_MARGIN};
use grablabel_core::{LabelColor, LabelFont, WidgetState};
use kurbo::{BezPath, Circle, Point, Rect, RoundedRect, Shape as KurboShape, Stroke};

/// Corner radius of the dashed border.
pub const BORDER_CORNER_RADIUS: f64 = 3.0;
/// Dash pattern of the border: 4 units on, 2 units off.
pub const BORDER_DASHES: [f64; 2] = [4.0, 2.0];
/// Line width of the border.
pub const BORDER_STROKE_WIDTH: f64 = 1.0;
/// Flattening tolerance used when converting shapes to paths.
const PATH_TOLERANCE: f64 = 0.1;

/// Stroke description with a fixed two-segment dash pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashedStroke {
    pub width: f64,
    pub dashes: [f64; 2],
    pub offset: f64,
}

impl DashedStroke {
    pub fn to_stroke(&self) -> Stroke {
        Stroke::new(self.width).with_dashes(self.offset, &self.dashes)
    }
}

/// The dashed selection border.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderArtifact {
    pub shape: RoundedRect,
    pub path: BezPath,
    pub stroke: DashedStroke,
    pub color: LabelColor,
    /// Always transparent; the border is never filled.
    pub fill: LabelColor,
}

/// Text block to lay out and draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub content: String,
    /// Area the text is confined to. Lines wrap to its width and lines
    /// starting below its bottom are dropped.
    pub rect: Rect,
    pub font: LabelFont,
    pub fill_color: LabelColor,
    /// Outline drawn beneath the fill.
    pub outline_color: LabelColor,
    pub outline_width: f64,
    /// Extra spacing between lines.
    pub line_spacing: f64,
}

impl TextLayout {
    /// Whether an outline pass is needed.
    pub fn has_outline(&self) -> bool {
        self.outline_width > 0.0 && self.outline_color.a > 0
    }

    /// Clip for the laid-out text, relative to the top-left of `rect`.
    ///
    /// Words wider than the rect cannot be wrapped; anything past its edges
    /// is cut off so it never reaches the border or the handle.
    pub fn clip_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.rect.size())
    }
}

/// The resize handle dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleArtifact {
    pub circle: Circle,
    pub color: LabelColor,
}

/// Drawing order of the scene parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneLayer {
    Border,
    Text,
    Handle,
}

/// Everything needed to paint a label, in its local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelScene {
    pub border: BorderArtifact,
    pub text: TextLayout,
    pub handle: HandleArtifact,
}

impl LabelScene {
    /// Layers back to front. The handle is always on top.
    pub const LAYERS: [SceneLayer; 3] = [SceneLayer::Border, SceneLayer::Text, SceneLayer::Handle];

    /// Build the scene for the current state.
    pub fn build(state: &WidgetState) -> Self {
        let bounds = state.geometry.local_bounds();
        let style = &state.style;

        Self {
            border: border(bounds, style.accent_color),
            text: TextLayout {
                content: state.text.clone(),
                rect: text_rect(bounds),
                font: style.font.clone(),
                fill_color: style.fill_color,
                outline_color: style.stroke_color,
                outline_width: style.stroke_width,
                line_spacing: 0.0,
            },
            handle: HandleArtifact {
                circle: state.handle().circle(),
                color: style.accent_color,
            },
        }
    }

    pub fn layers(&self) -> [SceneLayer; 3] {
        Self::LAYERS
    }
}

/// Border inset by half a handle on the right and bottom so it passes
/// through the handle's center.
fn border(bounds: Rect, color: LabelColor) -> BorderArtifact {
    let inset = HANDLE_SIZE / 2.0;
    let rect = Rect::new(
        bounds.x0,
        bounds.y0,
        (bounds.x1 - inset).max(bounds.x0),
        (bounds.y1 - inset).max(bounds.y0),
    );
    let shape = RoundedRect::from_rect(rect, BORDER_CORNER_RADIUS);
    BorderArtifact {
        shape,
        path: shape.to_path(PATH_TOLERANCE),
        stroke: DashedStroke {
            width: BORDER_STROKE_WIDTH,
            dashes: BORDER_DASHES,
            offset: 0.0,
        },
        color,
        fill: LabelColor::transparent(),
    }
}

fn text_rect(bounds: Rect) -> Rect {
    let x0 = bounds.x0 + TEXT_MARGIN;
    let y0 = bounds.y0 + TEXT_MARGIN;
    Rect::new(
        x0,
        y0,
        (bounds.x1 - HANDLE_SIZE).max(x0),
        (bounds.y1 - HANDLE_SIZE / 2.0).max(y0),
    )
}
