//! trellis-core - recovery of tabular data from vector-drawn PDF pages.
//!
//! Given the positioned glyphs and straight line segments a content-stream
//! walker produces for a page, this crate reconstructs logical tables: a
//! grid of cells, each holding the text that visually belongs inside it, in
//! reading order.
//!
//! The pipeline has two routes. The lattice route fuses noisy line
//! fragments into clean rulings, sweeps for their crossings, grows cells
//! from the crossings, and stitches cells into table regions. The stream
//! route merges glyphs into words by learned spacing, groups words into
//! lines, and infers column boundaries from alignment. A page can be probed
//! with both and the better fit chosen by a ratio heuristic.

pub mod config;
pub mod error;
pub mod extract;
pub mod geom;
pub mod index;
pub mod page;
pub mod table;
pub mod text;

pub use config::{TableParams, EPS, ROUND_DECIMALS};
pub use error::{Result, TableError};
pub use extract::{
    column_positions, detect_table_regions, find_cells, find_table_regions, LatticeExtractor,
    StreamExtractor,
};
pub use geom::{
    bounding_box_of, collapse_oriented_rulings, crop_rulings_to_area, find_intersections,
    ill_defined_cmp, sort_visually, HasRect, IntersectionMap, Point, PointKey, Rect, Ruling,
};
pub use index::RectangleSpatialIndex;
pub use page::{GlyphRecord, PageArea, SegmentRecord};
pub use table::{Cell, CellPosition, ExtractionMethod, RuledTable, Table};
pub use text::{group_by_lines, merge_words, FontId, Line, TextChunk, TextElement};
