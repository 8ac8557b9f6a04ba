//! Horizontal lines of text chunks.

use super::chunk::TextChunk;
use crate::geom::{bands_overlap, stable_sort_by, HasRect, Rect};

/// A rectangle enclosing a horizontal group of chunks.
#[derive(Debug, Clone, Default)]
pub struct Line {
    rect: Rect,
    chunks: Vec<TextChunk>,
}

impl Line {
    /// Append a chunk, growing the bound.
    pub fn add_chunk(&mut self, chunk: TextChunk) {
        if self.chunks.is_empty() {
            self.rect = chunk.rect();
        } else {
            self.rect.merge(&chunk.rect());
        }
        self.chunks.push(chunk);
    }

    /// The chunks of this line, left to right.
    pub fn chunks(&self) -> &[TextChunk] {
        &self.chunks
    }
}

impl HasRect for Line {
    fn rect(&self) -> Rect {
        self.rect
    }
}

/// Group chunks into lines by vertical proximity.
///
/// Chunks are visited in y order; a chunk that no longer overlaps the
/// current line's vertical band opens a new line. Within each line chunks
/// are ordered by their left edge.
pub fn group_by_lines(chunks: Vec<TextChunk>) -> Vec<Line> {
    let mut chunks = chunks;
    stable_sort_by(&mut chunks, |a, b| {
        (a.rect().bottom(), a.rect().left)
            .partial_cmp(&(b.rect().bottom(), b.rect().left))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut lines: Vec<Line> = Vec::new();
    let mut band_bottom = f64::MIN;
    let mut band_height = -1.0;
    for chunk in chunks {
        let rect = chunk.rect();
        let same_line = !lines.is_empty()
            && bands_overlap(rect.bottom(), rect.height, band_bottom, band_height);
        if same_line {
            band_bottom = band_bottom.max(rect.bottom());
            band_height = band_height.max(rect.height);
            lines
                .last_mut()
                .expect("a line exists when same_line is set")
                .add_chunk(chunk);
        } else {
            band_bottom = rect.bottom();
            band_height = rect.height;
            let mut line = Line::default();
            line.add_chunk(chunk);
            lines.push(line);
        }
    }

    for line in &mut lines {
        stable_sort_by(&mut line.chunks, |a, b| {
            a.rect()
                .left
                .partial_cmp(&b.rect().left)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::element::{FontId, TextElement};

    fn chunk_at(text: &str, left: f64, top: f64) -> TextChunk {
        TextChunk::of(TextElement::new(
            top,
            left,
            8.0,
            10.0,
            FontId(0),
            10.0,
            text,
            2.5,
            0.0,
        ))
    }

    #[test]
    fn two_rows_two_lines() {
        let chunks = vec![
            chunk_at("b", 50.0, 10.0),
            chunk_at("a", 10.0, 10.0),
            chunk_at("c", 10.0, 40.0),
        ];
        let lines = group_by_lines(chunks);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].chunks().len(), 2);
        assert_eq!(lines[0].chunks()[0].text(), "a");
        assert_eq!(lines[0].chunks()[1].text(), "b");
        assert_eq!(lines[1].chunks()[0].text(), "c");
    }

    #[test]
    fn overlapping_bands_stay_together() {
        // slightly jittered baselines
        let chunks = vec![chunk_at("a", 10.0, 10.0), chunk_at("b", 30.0, 12.0)];
        let lines = group_by_lines(chunks);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn empty_input() {
        assert!(group_by_lines(Vec::new()).is_empty());
    }

    #[test]
    fn line_rect_covers_chunks() {
        let chunks = vec![chunk_at("a", 10.0, 10.0), chunk_at("b", 50.0, 10.0)];
        let lines = group_by_lines(chunks);
        assert_eq!(lines[0].rect(), Rect::new(10.0, 10.0, 48.0, 10.0));
    }
}
