//! The sparse table grid.

use std::collections::BTreeMap;
use std::fmt;

use crate::geom::{HasRect, Rect};
use crate::text::TextChunk;

/// How a table was recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    /// From drawn ruling lines forming a visible grid.
    Lattice,
    /// From text alignment alone.
    Stream,
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMethod::Lattice => f.write_str("lattice"),
            ExtractionMethod::Stream => f.write_str("stream"),
        }
    }
}

/// A (row, column) slot, compared row-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellPosition {
    pub row: u32,
    pub col: u32,
}

/// A recovered table: a rectangle on the page plus a sparse row-major map
/// of chunks.
///
/// Adding a chunk grows the row and column counts as needed; adding on top
/// of an occupied slot merges the chunks. Missing slots materialize as the
/// empty chunk sentinel, never as an absent value.
#[derive(Debug, Clone)]
pub struct Table {
    rect: Rect,
    method: ExtractionMethod,
    page_number: u32,
    row_count: u32,
    col_count: u32,
    cells: BTreeMap<CellPosition, TextChunk>,
}

impl Table {
    pub fn new(method: ExtractionMethod) -> Self {
        Self {
            rect: Rect::default(),
            method,
            page_number: 0,
            row_count: 0,
            col_count: 0,
            cells: BTreeMap::new(),
        }
    }

    /// The sentinel for a page with nothing on it.
    pub fn empty() -> Self {
        Self::new(ExtractionMethod::Stream)
    }

    pub fn method(&self) -> ExtractionMethod {
        self.method
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn set_page_number(&mut self, page_number: u32) {
        self.page_number = page_number;
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    pub fn col_count(&self) -> u32 {
        self.col_count
    }

    /// Place a chunk at `(row, col)`.
    ///
    /// The table rectangle grows to cover the chunk, the counts grow to at
    /// least `(row + 1, col + 1)`, and an already occupied slot merges the
    /// new chunk with the old one in reading order.
    pub fn add(&mut self, chunk: TextChunk, row: u32, col: u32) {
        if self.cells.is_empty() && self.rect == Rect::default() {
            self.rect = chunk.rect();
        } else {
            let chunk_rect = chunk.rect();
            self.rect.merge(&chunk_rect);
        }

        self.row_count = self.row_count.max(row + 1);
        self.col_count = self.col_count.max(col + 1);

        let position = CellPosition { row, col };
        match self.cells.remove(&position) {
            Some(existing) => {
                let mut merged = chunk;
                merged.merge(existing);
                self.cells.insert(position, merged);
            }
            None => {
                self.cells.insert(position, chunk);
            }
        }
    }

    /// The chunk at `(row, col)`, or the empty sentinel.
    pub fn cell(&self, row: u32, col: u32) -> TextChunk {
        self.cells
            .get(&CellPosition { row, col })
            .cloned()
            .unwrap_or_else(TextChunk::empty)
    }

    /// The sparse cell map in row-major order.
    pub fn cells(&self) -> &BTreeMap<CellPosition, TextChunk> {
        &self.cells
    }

    /// Materialize the dense row matrix: `row_count` rows of `col_count`
    /// chunks, absent slots filled with the empty sentinel.
    pub fn rows(&self) -> Vec<Vec<TextChunk>> {
        (0..self.row_count)
            .map(|row| (0..self.col_count).map(|col| self.cell(row, col)).collect())
            .collect()
    }
}

impl HasRect for Table {
    fn rect(&self) -> Rect {
        self.rect
    }
}
