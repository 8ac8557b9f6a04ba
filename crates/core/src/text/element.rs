//! Single positioned glyphs as emitted by the content decoder.

use crate::geom::{HasRect, Rect};

/// Opaque identity of a font resource.
///
/// The core never resolves font metrics; it only needs to know when two
/// glyphs come from different fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub u32);

/// A positioned glyph: its box, its unicode text (typically one grapheme),
/// and the font facts the word merger consults. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    rect: Rect,
    text: String,
    font: FontId,
    font_size: f64,
    width_of_space: f64,
    direction: f64,
}

impl TextElement {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        top: f64,
        left: f64,
        width: f64,
        height: f64,
        font: FontId,
        font_size: f64,
        text: impl Into<String>,
        width_of_space: f64,
        direction: f64,
    ) -> Self {
        Self {
            rect: Rect::new(top, left, width, height),
            text: text.into(),
            font,
            font_size,
            width_of_space,
            direction,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> FontId {
        self.font
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Width-of-space hint from the glyph's font, used to estimate word gaps.
    pub fn width_of_space(&self) -> f64 {
        self.width_of_space
    }

    /// Text rotation in degrees.
    pub fn direction(&self) -> f64 {
        self.direction
    }
}

impl HasRect for TextElement {
    fn rect(&self) -> Rect {
        self.rect
    }
}
