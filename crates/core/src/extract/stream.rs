//! Stream extraction: tables recovered from text alignment alone.

use tracing::debug;

use crate::config::TableParams;
use crate::geom::{HasRect, Rect, Ruling};
use crate::page::PageArea;
use crate::table::{ExtractionMethod, Table};
use crate::text::{group_by_lines, merge_words, Line};

/// Infer column boundary x-coordinates from lines of chunks.
///
/// The non-whitespace chunks of the first line seed one region per column;
/// each later line's chunks either widen the region they horizontally
/// overlap or open a new region. The right edges of the regions, ascending,
/// are the boundaries.
pub fn column_positions(lines: &[Line]) -> Vec<f64> {
    let Some(first) = lines.first() else {
        return Vec::new();
    };

    let mut regions: Vec<Rect> = first
        .chunks()
        .iter()
        .filter(|chunk| !chunk.is_whitespace_only())
        .map(|chunk| chunk.rect())
        .collect();

    for line in &lines[1..] {
        let mut residual: Vec<Rect> = line
            .chunks()
            .iter()
            .filter(|chunk| !chunk.is_whitespace_only())
            .map(|chunk| chunk.rect())
            .collect();

        for region in &mut regions {
            let mut remaining = Vec::with_capacity(residual.len());
            for rect in residual {
                if region.horizontally_overlaps(&rect) {
                    region.merge(&rect);
                } else {
                    remaining.push(rect);
                }
            }
            residual = remaining;
        }
        regions.extend(residual);
    }

    let mut boundaries: Vec<f64> = regions.iter().map(Rect::right).collect();
    boundaries.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    boundaries
}

/// Extracts a table from text alignment, without any drawn grid.
#[derive(Debug, Clone, Default)]
pub struct StreamExtractor {
    params: TableParams,
    vertical_rulings: Option<Vec<Ruling>>,
}

impl StreamExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: TableParams) -> Self {
        Self {
            params,
            vertical_rulings: None,
        }
    }

    /// Use the given vertical rulings as column barriers and boundaries
    /// instead of inferring columns from alignment.
    pub fn with_vertical_rulings(mut self, rulings: Vec<Ruling>) -> Self {
        self.vertical_rulings = Some(rulings);
        self
    }

    /// Use full-height vertical rulings at the given x positions.
    pub fn with_vertical_positions(self, page: &PageArea, positions: &[f64]) -> Self {
        let page_rect = page.rect();
        let rulings = positions
            .iter()
            .map(|&x| Ruling::new(page_rect.top, x, 0.0, page_rect.height))
            .collect();
        self.with_vertical_rulings(rulings)
    }

    /// Extract the page's text into a single table.
    ///
    /// A page without text yields the empty sentinel table.
    pub fn extract(&self, page: &PageArea) -> Vec<Table> {
        if page.text().is_empty() {
            return vec![Table::empty()];
        }

        let barriers: &[Ruling] = self.vertical_rulings.as_deref().unwrap_or(&[]);
        let chunks = merge_words(page.text(), barriers, &self.params);
        let lines = group_by_lines(chunks);

        let columns: Vec<f64> = match &self.vertical_rulings {
            Some(rulings) => {
                let mut positions: Vec<f64> = rulings.iter().map(Ruling::left).collect();
                positions.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                positions
            }
            None => column_positions(&lines),
        };

        let mut table = Table::new(ExtractionMethod::Stream);
        table.set_rect(page.rect());
        table.set_page_number(page.page_number());

        for (row, line) in lines.iter().enumerate() {
            for chunk in line.chunks() {
                if chunk.is_whitespace_only() {
                    continue;
                }
                // the first boundary at or past the chunk's left edge names
                // its column; anything past the last boundary lands in a
                // trailing catch-all
                let col = columns
                    .iter()
                    .position(|&boundary| chunk.rect().left <= boundary)
                    .unwrap_or(columns.len());
                table.add(chunk.clone(), row as u32, col as u32);
            }
        }

        debug!(
            page = page.page_number(),
            rows = table.row_count(),
            cols = table.col_count(),
            "stream extraction finished"
        );
        vec![table]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{FontId, TextChunk, TextElement};

    fn chunk(text: &str, left: f64, top: f64, width: f64) -> TextChunk {
        TextChunk::of(TextElement::new(
            top,
            left,
            width,
            10.0,
            FontId(0),
            10.0,
            text,
            3.0,
            0.0,
        ))
    }

    #[test]
    fn column_positions_from_two_columns() {
        let lines = group_by_lines(vec![
            chunk("A", 10.0, 10.0, 8.0),
            chunk("B", 100.0, 10.0, 8.0),
            chunk("A", 10.0, 30.0, 8.0),
            chunk("B", 100.0, 30.0, 8.0),
        ]);
        let columns = column_positions(&lines);
        assert_eq!(columns, vec![18.0, 108.0]);
    }

    #[test]
    fn column_positions_absorb_overlapping_chunks() {
        let lines = group_by_lines(vec![
            chunk("head", 10.0, 10.0, 30.0),
            chunk("wider-cell", 5.0, 30.0, 50.0),
        ]);
        let columns = column_positions(&lines);
        assert_eq!(columns, vec![55.0]);
    }

    #[test]
    fn column_positions_empty_lines() {
        assert!(column_positions(&[]).is_empty());
    }

    #[test]
    fn new_region_from_unmatched_chunk() {
        let lines = group_by_lines(vec![
            chunk("A", 10.0, 10.0, 8.0),
            chunk("B", 100.0, 30.0, 8.0),
        ]);
        let columns = column_positions(&lines);
        assert_eq!(columns, vec![18.0, 108.0]);
    }
}
