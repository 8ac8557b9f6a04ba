//! Table cells discovered from ruling intersections.

use crate::geom::{sort_visually, HasRect, Point, Rect};
use crate::text::TextChunk;

/// An axis-aligned cell spanned by a top-left and a bottom-right ruling
/// intersection. Its chunk list is filled in after discovery.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    rect: Rect,
    chunks: Vec<TextChunk>,
}

impl Cell {
    /// Build a cell from its two defining intersection points.
    pub fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            rect: Rect::from_corners(top_left, bottom_right),
            chunks: Vec::new(),
        }
    }

    pub fn chunks(&self) -> &[TextChunk] {
        &self.chunks
    }

    pub fn set_chunks(&mut self, chunks: Vec<TextChunk>) {
        self.chunks = chunks;
    }

    /// The cell's text: chunks in visual order, with a carriage return
    /// whenever the top coordinate advances, trimmed.
    pub fn text(&self) -> String {
        if self.chunks.is_empty() {
            return String::new();
        }
        let mut sorted = self.chunks.clone();
        sort_visually(&mut sorted);

        let mut out = String::new();
        let mut current_top = sorted[0].rect().top;
        for chunk in &sorted {
            if chunk.rect().top > current_top {
                out.push('\r');
            }
            out.push_str(&chunk.text());
            current_top = chunk.rect().top;
        }
        out.trim().to_string()
    }

    /// Flatten the cell into a single chunk covering the cell's rectangle,
    /// with the glyphs of its chunks in visual order.
    pub fn merged_chunk(&self) -> TextChunk {
        let mut sorted = self.chunks.clone();
        sort_visually(&mut sorted);
        let mut merged = TextChunk::with_rect(self.rect);
        for chunk in sorted {
            for element in chunk.elements() {
                merged.add(element.clone());
            }
        }
        merged
    }
}

impl HasRect for Cell {
    fn rect(&self) -> Rect {
        self.rect
    }
}
