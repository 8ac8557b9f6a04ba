//! End-to-end tests for lattice extraction over decoded page content.

use trellis_core::{
    ExtractionMethod, FontId, GlyphRecord, HasRect, LatticeExtractor, PageArea, Rect,
    SegmentRecord, TableParams,
};

fn page_rect() -> Rect {
    Rect::new(0.0, 0.0, 612.0, 792.0)
}

fn segment(x1: f64, y1: f64, x2: f64, y2: f64) -> SegmentRecord {
    SegmentRecord {
        p1: (x1, y1),
        p2: (x2, y2),
    }
}

fn glyph(text: &str, x: f64, y: f64) -> GlyphRecord {
    GlyphRecord {
        x,
        y,
        width: 10.0,
        height: 10.0,
        font: FontId(0),
        font_size: 10.0,
        width_of_space: 3.0,
        text: text.to_string(),
        direction: 0.0,
    }
}

/// Rulings for a 3x3 grid spanning x 50..200, y 100..250.
fn grid_segments() -> Vec<SegmentRecord> {
    let mut segments = Vec::new();
    for y in [100.0, 150.0, 200.0, 250.0] {
        segments.push(segment(50.0, y, 200.0, y));
    }
    for x in [50.0, 100.0, 150.0, 200.0] {
        segments.push(segment(x, 100.0, x, 250.0));
    }
    segments
}

#[test]
fn three_by_three_grid() {
    let mut glyphs = Vec::new();
    for row in 0..3 {
        for col in 0..3 {
            glyphs.push(glyph(
                &format!("r{row}c{col}"),
                60.0 + col as f64 * 50.0,
                115.0 + row as f64 * 50.0,
            ));
        }
    }
    let page = PageArea::build(
        page_rect(),
        1,
        &glyphs,
        &grid_segments(),
        &TableParams::default(),
    )
    .unwrap();

    let tables = LatticeExtractor::new().extract(&page);
    assert_eq!(tables.len(), 1);

    let ruled = &tables[0];
    assert_eq!(ruled.cells().len(), 9);
    assert_eq!(ruled.rect(), Rect::new(100.0, 50.0, 150.0, 150.0));

    let table = ruled.table();
    assert_eq!(table.method(), ExtractionMethod::Lattice);
    assert_eq!(table.page_number(), 1);
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.col_count(), 3);
    for row in 0..3 {
        for col in 0..3 {
            assert_eq!(table.cell(row, col).text(), format!("r{row}c{col}"));
        }
    }
}

#[test]
fn broken_horizontal_line_fuses() {
    let segments = vec![
        // the top edge drawn as two collinear fragments with a 2pt gap
        segment(50.0, 100.0, 99.0, 100.0),
        segment(101.0, 100.0, 150.0, 100.0),
        segment(50.0, 200.0, 150.0, 200.0),
        segment(50.0, 100.0, 50.0, 200.0),
        segment(100.0, 100.0, 100.0, 200.0),
        segment(150.0, 100.0, 150.0, 200.0),
    ];
    let page =
        PageArea::build(page_rect(), 1, &[], &segments, &TableParams::default()).unwrap();
    let tables = LatticeExtractor::new().extract(&page);
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].cells().len(), 2);
    assert_eq!(tables[0].table().row_count(), 1);
    assert_eq!(tables[0].table().col_count(), 2);
}

#[test]
fn oblique_rulings_are_excluded() {
    let mut segments = grid_segments();
    segments.push(segment(0.0, 0.0, 300.0, 400.0));
    let page =
        PageArea::build(page_rect(), 1, &[], &segments, &TableParams::default()).unwrap();
    let tables = LatticeExtractor::new().extract(&page);
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].cells().len(), 9);
}

#[test]
fn region_rulings_are_attached() {
    let page = PageArea::build(
        page_rect(),
        1,
        &[],
        &grid_segments(),
        &TableParams::default(),
    )
    .unwrap();
    let tables = LatticeExtractor::new().extract(&page);
    assert_eq!(tables[0].horizontal_rulings().len(), 4);
    assert_eq!(tables[0].vertical_rulings().len(), 4);
}

#[test]
fn two_grids_are_two_tables_in_visual_order() {
    let mut segments = Vec::new();
    // lower-right grid first in the input
    for y in [500.0, 550.0] {
        segments.push(segment(300.0, y, 400.0, y));
    }
    for x in [300.0, 400.0] {
        segments.push(segment(x, 500.0, x, 550.0));
    }
    // upper-left grid
    for y in [100.0, 150.0] {
        segments.push(segment(50.0, y, 150.0, y));
    }
    for x in [50.0, 150.0] {
        segments.push(segment(x, 100.0, x, 150.0));
    }
    let page =
        PageArea::build(page_rect(), 1, &[], &segments, &TableParams::default()).unwrap();
    let tables = LatticeExtractor::new().extract(&page);
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].rect().top, 100.0);
    assert_eq!(tables[1].rect().top, 500.0);
}

#[test]
fn empty_page_yields_no_tables() {
    let page = PageArea::build(page_rect(), 1, &[], &[], &TableParams::default()).unwrap();
    assert!(LatticeExtractor::new().extract(&page).is_empty());
}

#[test]
fn detect_regions_without_text_fill() {
    let page = PageArea::build(
        page_rect(),
        1,
        &[],
        &grid_segments(),
        &TableParams::default(),
    )
    .unwrap();
    let regions = trellis_core::detect_table_regions(&page, &TableParams::default());
    assert_eq!(regions, vec![Rect::new(100.0, 50.0, 150.0, 150.0)]);
}

#[test]
fn multi_line_cell_text_keeps_line_breaks() {
    let mut segments = Vec::new();
    for y in [100.0, 200.0] {
        segments.push(segment(50.0, y, 150.0, y));
    }
    for x in [50.0, 150.0] {
        segments.push(segment(x, 100.0, x, 200.0));
    }
    let glyphs = vec![glyph("a", 60.0, 110.0), glyph("b", 60.0, 150.0)];
    let page =
        PageArea::build(page_rect(), 1, &glyphs, &segments, &TableParams::default()).unwrap();
    let tables = LatticeExtractor::new().extract(&page);
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].cells()[0].text(), "a\rb");
}
