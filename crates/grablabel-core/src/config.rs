//! Label configuration loaded from JSON.
//!
//! Every field is optional; missing fields take the widget defaults.
//!
//! ```json
//! {
//!   "text": "Hello",
//!   "fill_color": "#ffffff",
//!   "stroke_color": "#000000",
//!   "stroke_width": 2.0,
//!   "font": { "family": "Noto Sans", "size": 24.0 },
//!   "accent_color": "#0080ff",
//!   "frame": { "x": 40.0, "y": 40.0, "width": 220.0, "height": 90.0 },
//!   "screen": { "width": 1280.0, "height": 800.0 }
//! }
//! ```

use crate::geometry::LabelGeometry;
use crate::style::{LabelColor, LabelFont, LabelStyle, StyleError, validate_stroke_width};
use crate::widget::DEFAULT_TEXT;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid color for '{field}': {value}")]
    InvalidColor { field: &'static str, value: String },
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error(transparent)]
    Style(#[from] StyleError),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Font entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    pub family: String,
    pub size: f64,
}

/// Initial frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameConfig {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Screen the label lives on; bounds the resize ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Label configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub text: String,
    pub fill_color: String,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub font: Option<FontConfig>,
    pub accent_color: String,
    pub frame: Option<FrameConfig>,
    pub screen: ScreenConfig,
}

impl Default for LabelConfig {
    fn default() -> Self {
        let style = LabelStyle::default();
        Self {
            text: DEFAULT_TEXT.to_string(),
            fill_color: style.fill_color.to_hex(),
            stroke_color: style.stroke_color.to_hex(),
            stroke_width: style.stroke_width,
            font: None,
            accent_color: style.accent_color.to_hex(),
            frame: None,
            screen: ScreenConfig::default(),
        }
    }
}

impl LabelConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded label configuration from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the label style.
    ///
    /// An unusable font entry falls back to the default font instead of
    /// failing.
    pub fn style(&self) -> ConfigResult<LabelStyle> {
        let stroke_width = validate_stroke_width(self.stroke_width)?;
        let font = match &self.font {
            Some(entry) => LabelFont::new(entry.family.clone(), entry.size).unwrap_or_else(|e| {
                log::warn!("Unusable font in configuration ({}), using default font", e);
                LabelFont::default()
            }),
            None => LabelFont::default(),
        };
        Ok(LabelStyle {
            fill_color: parse_color("fill_color", &self.fill_color)?,
            stroke_color: parse_color("stroke_color", &self.stroke_color)?,
            stroke_width,
            font,
            accent_color: parse_color("accent_color", &self.accent_color)?,
        })
    }

    /// Initial geometry, or the default one when no frame is configured.
    pub fn geometry(&self) -> ConfigResult<LabelGeometry> {
        let Some(frame) = self.frame else {
            return Ok(LabelGeometry::default());
        };
        if ![frame.x, frame.y].iter().all(|v| v.is_finite()) {
            return Err(ConfigError::InvalidValue {
                field: "frame",
                reason: "origin must be finite".to_string(),
            });
        }
        let size = positive_size("frame", frame.width, frame.height)?;
        Ok(LabelGeometry::new(Point::new(frame.x, frame.y), size))
    }

    /// Screen size.
    pub fn screen_size(&self) -> ConfigResult<Size> {
        positive_size("screen", self.screen.width, self.screen.height)
    }
}

fn parse_color(field: &'static str, value: &str) -> ConfigResult<LabelColor> {
    LabelColor::from_hex(value).ok_or_else(|| ConfigError::InvalidColor {
        field,
        value: value.to_string(),
    })
}

fn positive_size(field: &'static str, width: f64, height: f64) -> ConfigResult<Size> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) {
        Ok(Size::new(width, height))
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("size must be finite and positive, got {}x{}", width, height),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = LabelConfig::from_json("{}").unwrap();
        assert_eq!(config, LabelConfig::default());
        assert_eq!(config.style().unwrap(), LabelStyle::default());
        assert_eq!(config.geometry().unwrap(), LabelGeometry::default());
        assert_eq!(config.screen_size().unwrap(), Size::new(1280.0, 800.0));
    }

    #[test]
    fn test_full_config() {
        let json = r##"{
            "text": "Hello",
            "fill_color": "#ff0000",
            "stroke_color": "#00ff0080",
            "stroke_width": 3.0,
            "font": { "family": "Noto Sans", "size": 24.0 },
            "accent_color": "#123456",
            "frame": { "x": 40.0, "y": 30.0, "width": 220.0, "height": 90.0 },
            "screen": { "width": 640.0, "height": 480.0 }
        }"##;
        let config = LabelConfig::from_json(json).unwrap();
        assert_eq!(config.text, "Hello");

        let style = config.style().unwrap();
        assert_eq!(style.fill_color, LabelColor::rgb(255, 0, 0));
        assert_eq!(style.stroke_color, LabelColor::new(0, 255, 0, 128));
        assert_eq!(style.accent_color, LabelColor::rgb(0x12, 0x34, 0x56));
        assert!((style.stroke_width - 3.0).abs() < f64::EPSILON);
        assert_eq!(style.font, LabelFont::new("Noto Sans", 24.0).unwrap());

        let geometry = config.geometry().unwrap();
        assert_eq!(geometry.origin(), Point::new(40.0, 30.0));
        assert_eq!(geometry.size(), Size::new(220.0, 90.0));
        assert_eq!(config.screen_size().unwrap(), Size::new(640.0, 480.0));
    }

    #[test]
    fn test_invalid_color() {
        let config = LabelConfig::from_json(r#"{ "fill_color": "red" }"#).unwrap();
        match config.style() {
            Err(ConfigError::InvalidColor { field, value }) => {
                assert_eq!(field, "fill_color");
                assert_eq!(value, "red");
            }
            other => panic!("Expected invalid color, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_stroke_width() {
        let config = LabelConfig::from_json(r#"{ "stroke_width": -1.0 }"#).unwrap();
        assert!(matches!(
            config.style(),
            Err(ConfigError::Style(StyleError::InvalidStrokeWidth(_)))
        ));
    }

    #[test]
    fn test_bad_font_falls_back() {
        let config = LabelConfig::from_json(r#"{ "font": { "family": "", "size": 12.0 } }"#).unwrap();
        assert_eq!(config.style().unwrap().font, LabelFont::default());
    }

    #[test]
    fn test_invalid_frame() {
        let config =
            LabelConfig::from_json(r#"{ "frame": { "x": 0.0, "y": 0.0, "width": 0.0, "height": 10.0 } }"#)
                .unwrap();
        assert!(matches!(
            config.geometry(),
            Err(ConfigError::InvalidValue { field: "frame", .. })
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            LabelConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "text": "From disk", "stroke_width": 1.5 }}"#).unwrap();

        let config = LabelConfig::load(file.path()).unwrap();
        assert_eq!(config.text, "From disk");
        assert!((config.stroke_width - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = LabelConfig::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_json_round_trip_of_defaults() {
        let json = LabelConfig::default().to_json().unwrap();
        assert_eq!(LabelConfig::from_json(&json).unwrap(), LabelConfig::default());
    }
}
