//! Vello-based renderer implementation.

use crate::renderer::{LabelRenderer, RenderContext, RenderResult, RendererError};
use crate::scene::{BorderArtifact, HandleArtifact, LabelScene, SceneLayer, TextLayout};
use grablabel_core::{FontSource, LabelFont};
use kurbo::{Affine, Stroke};
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, LayoutContext};
use peniko::{Brush, Color, Fill};
use std::collections::HashSet;
use vello::Scene;

/// Vello-based renderer for a single label.
pub struct VelloLabelRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Font context for text rendering (cached to avoid re-registering fonts).
    font_cx: FontContext,
    /// Layout context for text rendering.
    layout_cx: LayoutContext<Brush>,
    /// Family names known to `font_cx`.
    families: HashSet<String>,
    /// Last requested font and what it resolved to.
    resolved_font: Option<(LabelFont, LabelFont)>,
}

impl Default for VelloLabelRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FontSource for VelloLabelRenderer {
    fn has_family(&self, family: &str) -> bool {
        self.families.contains(family)
    }
}

impl VelloLabelRenderer {
    /// Create a new renderer using the system font collection.
    pub fn new() -> Self {
        let mut renderer = Self {
            scene: Scene::new(),
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
            families: HashSet::new(),
            resolved_font: None,
        };
        renderer.refresh_families();
        log::debug!("Vello label renderer ready with {} font families", renderer.families.len());
        renderer
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Register font data (TTF/OTF/collection) and return the new family names.
    pub fn register_font(&mut self, data: Vec<u8>) -> RenderResult<Vec<String>> {
        let registered = self
            .font_cx
            .collection
            .register_fonts(vello::peniko::Blob::new(std::sync::Arc::new(data)), None);
        if registered.is_empty() {
            return Err(RendererError::Font("no usable fonts in data".to_string()));
        }
        let names: Vec<String> = registered
            .iter()
            .filter_map(|(id, _)| self.font_cx.collection.family_name(*id).map(str::to_string))
            .collect();
        self.families.extend(names.iter().cloned());
        self.resolved_font = None;
        log::info!("Registered font families: {:?}", names);
        Ok(names)
    }

    fn refresh_families(&mut self) {
        self.families = self
            .font_cx
            .collection
            .family_names()
            .map(str::to_string)
            .collect();
    }

    /// Resolve `requested` against the known families, once per distinct font.
    fn resolve_font(&mut self, requested: &LabelFont) -> LabelFont {
        if let Some((key, resolved)) = &self.resolved_font {
            if key == requested {
                return resolved.clone();
            }
        }
        let resolved = requested.resolve(&*self);
        self.resolved_font = Some((requested.clone(), resolved.clone()));
        resolved
    }

    fn render_border(&mut self, border: &BorderArtifact, transform: Affine) {
        self.scene.stroke(
            &border.stroke.to_stroke(),
            transform,
            Color::from(border.color),
            None,
            &border.path,
        );
    }

    /// Lay the text out with Parley, then draw the outline and the fill.
    fn render_text(&mut self, text: &TextLayout, transform: Affine) {
        use parley::StyleProperty;

        if text.content.is_empty() || text.rect.width() <= 0.0 || text.rect.height() <= 0.0 {
            return;
        }

        let font = self.resolve_font(&text.font);
        let fill_brush = Brush::Solid(Color::from(text.fill_color));
        let outline_brush = Brush::Solid(Color::from(text.outline_color));
        let max_width = text.rect.width() as f32;

        // Fall back to a generic family if even the default font is missing.
        let stack = format!("\"{}\", sans-serif", font.family);
        let mut builder = self.layout_cx.ranged_builder(&mut self.font_cx, &text.content, 1.0, false);
        builder.push_default(StyleProperty::FontSize(font.size as f32));
        builder.push_default(StyleProperty::Brush(fill_brush.clone()));
        builder.push_default(StyleProperty::FontStack(parley::FontStack::Source(stack.into())));
        let mut layout = builder.build(&text.content);

        layout.break_all_lines(Some(max_width));
        layout.align(Some(max_width), parley::Alignment::Center, parley::AlignmentOptions::default());

        let text_transform = transform * Affine::translate((text.rect.x0, text.rect.y0));
        let outline = text.has_outline().then(|| Stroke::new(text.outline_width));
        let bottom = text.rect.height() as f32;

        self.scene.push_clip_layer(text_transform, &text.clip_rect());
        for line in layout.lines() {
            if line.metrics().baseline > bottom {
                break;
            }
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let run = glyph_run.run();
                let font = run.font();
                let font_size = run.font_size();
                let synthesis = run.synthesis();
                let glyph_xform = synthesis
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let gx = x + glyph.x;
                        let gy = y - glyph.y;
                        x += glyph.advance;
                        vello::Glyph {
                            id: glyph.id,
                            x: gx,
                            y: gy,
                        }
                    })
                    .collect();
                if glyphs.is_empty() {
                    continue;
                }

                // Outline first so the fill covers its inner half.
                if let Some(stroke) = &outline {
                    self.scene
                        .draw_glyphs(font)
                        .brush(&outline_brush)
                        .hint(false)
                        .transform(text_transform)
                        .glyph_transform(glyph_xform)
                        .font_size(font_size)
                        .normalized_coords(run.normalized_coords())
                        .draw(stroke, glyphs.iter().copied());
                }
                self.scene
                    .draw_glyphs(font)
                    .brush(&fill_brush)
                    .hint(true)
                    .transform(text_transform)
                    .glyph_transform(glyph_xform)
                    .font_size(font_size)
                    .normalized_coords(run.normalized_coords())
                    .draw(Fill::NonZero, glyphs.into_iter());
            }
        }
        self.scene.pop_layer();
    }

    fn render_handle(&mut self, handle: &HandleArtifact, transform: Affine) {
        self.scene.fill(
            Fill::NonZero,
            transform,
            Color::from(handle.color),
            None,
            &handle.circle,
        );
    }
}

impl LabelRenderer for VelloLabelRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        // Full rebuild every frame.
        self.scene.reset();

        let label_scene = LabelScene::build(ctx.widget.state());
        let transform = ctx.transform();

        for layer in label_scene.layers() {
            match layer {
                SceneLayer::Border => self.render_border(&label_scene.border, transform),
                SceneLayer::Text => self.render_text(&label_scene.text, transform),
                SceneLayer::Handle => self.render_handle(&label_scene.handle, transform),
            }
        }
    }
}
