//! Tests for the lattice/stream agreement heuristic.

use trellis_core::{
    FontId, GlyphRecord, LatticeExtractor, PageArea, Rect, SegmentRecord, StreamExtractor,
    TableParams,
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

fn glyph(text: &str, x: f64, y: f64, width: f64) -> GlyphRecord {
    GlyphRecord {
        x,
        y,
        width,
        height: 10.0,
        font: FontId(0),
        font_size: 10.0,
        width_of_space: 4.0,
        text: text.to_string(),
        direction: 0.0,
    }
}

/// A ruled 5x4 grid whose text also reads as 5 rows by 4 columns: both
/// extractors agree, so the page is tabular.
#[test]
fn agreeing_extractors_mean_tabular() {
    let mut segments = Vec::new();
    for y in [100.0, 140.0, 180.0, 220.0, 260.0, 300.0] {
        segments.push(segment(50.0, y, 250.0, y));
    }
    for x in [50.0, 100.0, 150.0, 200.0, 250.0] {
        segments.push(segment(x, 100.0, x, 300.0));
    }

    let mut glyphs = Vec::new();
    for row in 0..5 {
        for col in 0..4 {
            // pin the text bounds to the grid corners so cropping to the
            // minimal text region keeps the outer rulings
            let (x, y, width) = match (row, col) {
                (0, 0) => (50.0, 100.0, 20.0),
                (4, 3) => (220.0, 290.0, 30.0),
                // the last row sits flush with the grid bottom
                (4, _) => (55.0 + col as f64 * 50.0, 290.0, 20.0),
                _ => (55.0 + col as f64 * 50.0, 105.0 + row as f64 * 40.0, 20.0),
            };
            glyphs.push(glyph("x", x, y, width));
        }
    }

    let page = PageArea::build(page_rect(), 1, &glyphs, &segments, &TableParams::default())
        .unwrap();
    let lattice = LatticeExtractor::new();

    // sanity: both extractors see the same shape
    let ruled = lattice.extract(&page);
    assert_eq!(ruled[0].table().row_count(), 5);
    assert_eq!(ruled[0].table().col_count(), 4);
    let streamed = StreamExtractor::new().extract(&page);
    assert_eq!(streamed[0].row_count(), 5);
    assert_eq!(streamed[0].col_count(), 4);

    assert!(lattice.is_tabular(&page));
}

/// A single drawn box around prose that reads as 10 rows by 5 columns:
/// the extractors disagree badly, so the page is not tabular.
#[test]
fn disagreeing_extractors_mean_not_tabular() {
    let segments = vec![
        segment(50.0, 100.0, 550.0, 100.0),
        segment(50.0, 700.0, 550.0, 700.0),
        segment(50.0, 100.0, 50.0, 700.0),
        segment(550.0, 100.0, 550.0, 700.0),
    ];

    let mut glyphs = Vec::new();
    for row in 0..10 {
        for col in 0..5 {
            let (x, y, width) = match (row, col) {
                (0, 0) => (50.0, 100.0, 20.0),
                (9, 4) => (460.0, 690.0, 90.0),
                _ => {
                    let top = if row == 9 { 690.0 } else { 100.0 + row as f64 * 60.0 };
                    (50.0 + col as f64 * 100.0, top, 20.0)
                }
            };
            glyphs.push(glyph("x", x, y, width));
        }
    }

    let page = PageArea::build(page_rect(), 1, &glyphs, &segments, &TableParams::default())
        .unwrap();
    let lattice = LatticeExtractor::new();

    let ruled = lattice.extract(&page);
    assert_eq!(ruled[0].table().row_count(), 1);
    assert_eq!(ruled[0].table().col_count(), 1);

    assert!(!lattice.is_tabular(&page));
}

#[test]
fn blank_page_is_not_tabular() {
    let page = PageArea::build(page_rect(), 1, &[], &[], &TableParams::default()).unwrap();
    assert!(!LatticeExtractor::new().is_tabular(&page));
}
