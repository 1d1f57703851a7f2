//! Presentational properties of the label: colors, stroke and font.

use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Style validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum StyleError {
    #[error("Stroke width must be finite and non-negative, got {0}")]
    InvalidStrokeWidth(f64),
    #[error("Font size must be finite and positive, got {0}")]
    InvalidFontSize(f64),
    #[error("Font family name is empty")]
    EmptyFontFamily,
}

/// Result type for style operations.
pub type StyleResult<T> = Result<T, StyleError>;

/// RGBA8 color, comparable and serializable.
///
/// Converted to a [`peniko::Color`] at the rendering boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl LabelColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Default accent used for the border and the resize handle.
    pub const fn accent() -> Self {
        Self::rgb(0, 128, 255)
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Format as `#rrggbbaa`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl From<Color> for LabelColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<LabelColor> for Color {
    fn from(color: LabelColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Lookup of installed font families.
///
/// Implemented by rendering backends that know which fonts are registered.
pub trait FontSource {
    /// Whether `family` can be used for text layout.
    fn has_family(&self, family: &str) -> bool;
}

/// Font used for the label text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelFont {
    /// Family name as known to the text system.
    pub family: String,
    /// Size in points.
    pub size: f64,
}

impl LabelFont {
    pub const DEFAULT_FAMILY: &'static str = "Helvetica Neue";
    pub const DEFAULT_SIZE: f64 = 18.0;

    /// Create a font, validating the family name and size.
    pub fn new(family: impl Into<String>, size: f64) -> StyleResult<Self> {
        let font = Self {
            family: family.into(),
            size,
        };
        font.validate()?;
        Ok(font)
    }

    /// Check the family name and size.
    pub fn validate(&self) -> StyleResult<()> {
        if self.family.trim().is_empty() {
            return Err(StyleError::EmptyFontFamily);
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(StyleError::InvalidFontSize(self.size));
        }
        Ok(())
    }

    /// Return this font if `source` knows its family, otherwise the default
    /// family at the same size.
    pub fn resolve(&self, source: &dyn FontSource) -> LabelFont {
        if source.has_family(&self.family) {
            return self.clone();
        }
        log::warn!(
            "Font family '{}' is unavailable, falling back to '{}'",
            self.family,
            Self::DEFAULT_FAMILY
        );
        Self {
            family: Self::DEFAULT_FAMILY.to_string(),
            size: self.size,
        }
    }
}

impl Default for LabelFont {
    fn default() -> Self {
        Self {
            family: Self::DEFAULT_FAMILY.to_string(),
            size: Self::DEFAULT_SIZE,
        }
    }
}

/// Complete style of a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    /// Text fill color.
    pub fill_color: LabelColor,
    /// Text outline color.
    pub stroke_color: LabelColor,
    /// Text outline width (>= 0).
    pub stroke_width: f64,
    /// Text font.
    pub font: LabelFont,
    /// Color of the dashed border and the resize handle.
    pub accent_color: LabelColor,
}

impl LabelStyle {
    pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

    /// Check every field that has a valid range.
    pub fn validate(&self) -> StyleResult<()> {
        validate_stroke_width(self.stroke_width)?;
        self.font.validate()
    }
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            fill_color: LabelColor::white(),
            stroke_color: LabelColor::black(),
            stroke_width: Self::DEFAULT_STROKE_WIDTH,
            font: LabelFont::default(),
            accent_color: LabelColor::accent(),
        }
    }
}

/// Check that a stroke width is usable.
pub fn validate_stroke_width(width: f64) -> StyleResult<f64> {
    if width.is_finite() && width >= 0.0 {
        Ok(width)
    } else {
        Err(StyleError::InvalidStrokeWidth(width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Installed(&'static [&'static str]);

    impl FontSource for Installed {
        fn has_family(&self, family: &str) -> bool {
            self.0.contains(&family)
        }
    }

    #[test]
    fn test_default_style() {
        let style = LabelStyle::default();
        assert_eq!(style.fill_color, LabelColor::white());
        assert_eq!(style.stroke_color, LabelColor::black());
        assert_eq!(style.accent_color, LabelColor::rgb(0, 128, 255));
        assert!((style.stroke_width - 2.0).abs() < f64::EPSILON);
        assert_eq!(style.font.family, "Helvetica Neue");
        assert!((style.font.size - 18.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(LabelColor::from_hex("#ff8000"), Some(LabelColor::rgb(255, 128, 0)));
        assert_eq!(
            LabelColor::from_hex("#0080ff80"),
            Some(LabelColor::new(0, 128, 255, 128))
        );
        assert_eq!(LabelColor::from_hex("ff8000"), None);
        assert_eq!(LabelColor::from_hex("#ff80"), None);
        assert_eq!(LabelColor::from_hex("#gg0000"), None);
        assert_eq!(LabelColor::from_hex("#ffé000"), None);
    }

    #[test]
    fn test_hex_format() {
        assert_eq!(LabelColor::accent().to_hex(), "#0080ffff");
    }

    #[test]
    fn test_peniko_conversion() {
        let color = LabelColor::new(10, 20, 30, 40);
        let peniko_color: Color = color.into();
        assert_eq!(LabelColor::from(peniko_color), color);
    }

    #[test]
    fn test_font_validation() {
        assert!(LabelFont::new("Noto Sans", 12.0).is_ok());
        assert_eq!(LabelFont::new("  ", 12.0), Err(StyleError::EmptyFontFamily));
        assert_eq!(LabelFont::new("Noto Sans", 0.0), Err(StyleError::InvalidFontSize(0.0)));
        assert!(LabelFont::new("Noto Sans", f64::NAN).is_err());
    }

    #[test]
    fn test_font_resolve_known_family() {
        let font = LabelFont::new("Noto Sans", 24.0).unwrap();
        let resolved = font.resolve(&Installed(&["Noto Sans"]));
        assert_eq!(resolved, font);
    }

    #[test]
    fn test_font_resolve_falls_back_to_default() {
        let font = LabelFont::new("Missing Font", 24.0).unwrap();
        let resolved = font.resolve(&Installed(&["Noto Sans"]));
        assert_eq!(resolved.family, LabelFont::DEFAULT_FAMILY);
        assert!((resolved.size - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stroke_width_validation() {
        assert_eq!(validate_stroke_width(0.0), Ok(0.0));
        assert_eq!(validate_stroke_width(3.5), Ok(3.5));
        assert!(validate_stroke_width(-1.0).is_err());
        assert!(validate_stroke_width(f64::INFINITY).is_err());
    }
}
