use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::fonts::DEFAULT_FAMILY;

/// Widest stroke the line-width picker may set.
pub const MAX_LINE_WIDTH: f32 = 256.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub family: String,
    /// Pixel height of the font
    pub size: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: DEFAULT_FAMILY.to_owned(),
            size: 24.0,
        }
    }
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

/// Per-session drawing parameters, changed only through picker events and
/// read when a gesture starts.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingParameters {
    color: Color32,
    width: f32,
    font: FontSpec,
}

impl Default for DrawingParameters {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            width: 2.0,
            font: FontSpec::default(),
        }
    }
}

impl DrawingParameters {
    pub fn new(color: Color32, width: f32, font: FontSpec) -> Self {
        let mut params = Self {
            color,
            ..Self::default()
        };
        params.set_width(width);
        params.set_font(font);
        params
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    /// Sets the line width. Non-finite or non-positive widths are rejected
    /// and leave the current width in place.
    pub fn set_width(&mut self, width: f32) -> bool {
        if !width.is_finite() || width <= 0.0 {
            log::warn!("Ignoring invalid line width {width}");
            return false;
        }
        self.width = width.min(MAX_LINE_WIDTH);
        true
    }

    pub fn set_font(&mut self, font: FontSpec) -> bool {
        if !font.size.is_finite() || font.size <= 0.0 {
            log::warn!("Ignoring invalid font size {}", font.size);
            return false;
        }
        self.font = font;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_rejects_non_positive() {
        let mut params = DrawingParameters::default();
        assert!(!params.set_width(0.0));
        assert!(!params.set_width(-3.0));
        assert!(!params.set_width(f32::NAN));
        assert_eq!(params.width(), 2.0);
        assert!(params.set_width(7.5));
        assert_eq!(params.width(), 7.5);
    }

    #[test]
    fn test_width_capped() {
        let mut params = DrawingParameters::default();
        params.set_width(10_000.0);
        assert_eq!(params.width(), MAX_LINE_WIDTH);
    }

    #[test]
    fn test_font_rejects_zero_size() {
        let mut params = DrawingParameters::default();
        assert!(!params.set_font(FontSpec::new("Hack", 0.0)));
        assert_eq!(params.font(), &FontSpec::default());
    }
}
