//! End-to-end tests for stream extraction.

use trellis_core::{
    ExtractionMethod, FontId, GlyphRecord, PageArea, Rect, StreamExtractor, TableParams,
};

fn page_rect() -> Rect {
    Rect::new(0.0, 0.0, 612.0, 792.0)
}

fn glyph(text: &str, x: f64, y: f64, width: f64) -> GlyphRecord {
    GlyphRecord {
        x,
        y,
        width,
        height: 10.0,
        font: FontId(0),
        font_size: 10.0,
        width_of_space: 3.0,
        text: text.to_string(),
        direction: 0.0,
    }
}

fn build_page(glyphs: &[GlyphRecord]) -> PageArea {
    PageArea::build(page_rect(), 1, glyphs, &[], &TableParams::default()).unwrap()
}

#[test]
fn two_columns_three_rows() {
    let mut glyphs = Vec::new();
    for y in [10.0, 30.0, 50.0] {
        glyphs.push(glyph("A", 10.0, y, 8.0));
        glyphs.push(glyph("B", 100.0, y, 8.0));
    }
    let page = build_page(&glyphs);
    let tables = StreamExtractor::new().extract(&page);
    assert_eq!(tables.len(), 1);

    let table = &tables[0];
    assert_eq!(table.method(), ExtractionMethod::Stream);
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.col_count(), 2);
    for row in 0..3 {
        assert_eq!(table.cell(row, 0).text(), "A");
        assert_eq!(table.cell(row, 1).text(), "B");
    }
}

#[test]
fn synthetic_space_keeps_words_together() {
    // "Hello World": the gap before 'W' exceeds the expected next-word
    // start but stays below the space width, so a space is injected and
    // the line remains one chunk
    let mut glyphs = Vec::new();
    let mut x = 10.0;
    for c in ["H", "e", "l", "l", "o"] {
        glyphs.push(glyph(c, x, 10.0, 5.0));
        x += 5.0;
    }
    x += 2.0;
    for c in ["W", "o", "r", "l", "d"] {
        glyphs.push(glyph(c, x, 10.0, 5.0));
        x += 5.0;
    }
    let page = build_page(&glyphs);
    let tables = StreamExtractor::new().extract(&page);
    let table = &tables[0];
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.col_count(), 1);
    assert_eq!(table.cell(0, 0).text(), "Hello World");
}

#[test]
fn vertical_ruling_splits_chunks() {
    let glyphs = vec![glyph("A", 10.0, 10.0, 6.0), glyph("B", 30.0, 10.0, 6.0)];
    let page = build_page(&glyphs);

    let tables = StreamExtractor::new()
        .with_vertical_positions(&page, &[20.0])
        .extract(&page);
    let table = &tables[0];
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.col_count(), 2);
    assert_eq!(table.cell(0, 0).text(), "A");
    assert_eq!(table.cell(0, 1).text(), "B");
}

#[test]
fn empty_page_yields_sentinel_table() {
    let page = build_page(&[]);
    let tables = StreamExtractor::new().extract(&page);
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].row_count(), 0);
    assert_eq!(tables[0].col_count(), 0);
    assert_eq!(tables[0].method(), ExtractionMethod::Stream);
}

#[test]
fn whitespace_chunks_are_not_placed() {
    let glyphs = vec![
        glyph("A", 10.0, 10.0, 8.0),
        // a lone wide space far from anything else
        glyph(" ", 200.0, 10.0, 8.0),
        glyph("B", 300.0, 10.0, 8.0),
    ];
    let page = build_page(&glyphs);
    let tables = StreamExtractor::new().extract(&page);
    let table = &tables[0];
    assert_eq!(table.col_count(), 2);
    assert_eq!(table.cell(0, 0).text(), "A");
    assert_eq!(table.cell(0, 1).text(), "B");
}

#[test]
fn table_covers_page_rect() {
    let glyphs = vec![glyph("A", 10.0, 10.0, 8.0)];
    let page = build_page(&glyphs);
    let tables = StreamExtractor::new().extract(&page);
    let rect = trellis_core::HasRect::rect(&tables[0]);
    assert!(rect.contains(&page_rect()));
    assert_eq!(tables[0].page_number(), 1);
}

#[test]
fn injected_rulings_define_columns() {
    let glyphs = vec![
        glyph("a", 10.0, 10.0, 8.0),
        glyph("b", 110.0, 10.0, 8.0),
        glyph("c", 210.0, 10.0, 8.0),
    ];
    let page = build_page(&glyphs);
    let tables = StreamExtractor::new()
        .with_vertical_positions(&page, &[100.0, 200.0])
        .extract(&page);
    let table = &tables[0];
    assert_eq!(table.col_count(), 3);
    assert_eq!(table.cell(0, 0).text(), "a");
    assert_eq!(table.cell(0, 1).text(), "b");
    assert_eq!(table.cell(0, 2).text(), "c");
}
