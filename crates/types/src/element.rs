use crate::color::Rgb;
use serde::{Deserialize, Serialize};

fn default_font() -> String {
    "TrebuchetMS".to_string()
}

/// A run of text positioned in source space (`y` grows downward from the page top).
///
/// Elements are read-only once loaded. Corrections produce derived values and
/// never write back into the element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    #[serde(rename = "font", default = "default_font")]
    pub font_family: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    /// Packed 24-bit color integer.
    #[serde(default)]
    pub color: u32,
}

impl TextElement {
    pub fn new(text: impl Into<String>, x: f32, y: f32, size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            size,
            font_family: default_font(),
            bold: false,
            italic: false,
            color: 0,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    /// Neither bold nor italic.
    pub fn is_plain(&self) -> bool {
        !(self.bold || self.italic)
    }
}

/// A filled rectangle. Coordinates are already in target (bottom-up) space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectShape {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill_color: Rgb,
}

/// A decorative shape. Only rectangles are drawn; any other `type` tag
/// deserializes to [`ShapeElement::Unsupported`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeElement {
    Rect(RectShape),
    #[serde(other)]
    Unsupported,
}
