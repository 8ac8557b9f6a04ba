//! Page-local content: ingested glyphs, rulings, and the spatial index.
//!
//! [`PageArea`] is the handoff point between the external content decoder
//! and the extractors. Ingestion applies the glyph hygiene filters, rounds
//! coordinates to key precision, normalizes segments into rulings, and
//! builds the spatial index once; everything afterwards is read-only.

use tracing::debug;

use crate::config::TableParams;
use crate::error::{Result, TableError};
use crate::geom::{
    collapse_oriented_rulings, crop_rulings_to_area, round2, Point, Rect, Ruling,
};
use crate::HasRect;
use crate::index::RectangleSpatialIndex;
use crate::text::{FontId, TextElement};

/// A raw glyph as reported by the content decoder, in y-down page
/// coordinates with the origin at the upper left.
#[derive(Debug, Clone)]
pub struct GlyphRecord {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub font: FontId,
    pub font_size: f64,
    pub width_of_space: f64,
    pub text: String,
    /// Text rotation in degrees.
    pub direction: f64,
}

/// A raw line segment as reported by the content decoder, already clipped
/// to the page's clipping path.
#[derive(Debug, Clone, Copy)]
pub struct SegmentRecord {
    pub p1: Point,
    pub p2: Point,
}

const NBSP: &str = "\u{a0}";

/// A page (or sub-region of a page) ready for extraction.
pub struct PageArea {
    rect: Rect,
    page_number: u32,
    rulings: Vec<Ruling>,
    index: RectangleSpatialIndex<TextElement>,
}

impl PageArea {
    /// Ingest decoder output into a queryable page.
    ///
    /// Glyphs pass through the hygiene filters: non-printable glyphs are
    /// dropped, non-breaking spaces become plain spaces, coordinates are
    /// rounded to key precision, and blank glyphs that are far taller than
    /// the running average height or carry an implausible font size are
    /// dropped. Segments at or below the minimum ruling length are dropped.
    pub fn build(
        crop_box: Rect,
        page_number: u32,
        glyphs: &[GlyphRecord],
        segments: &[SegmentRecord],
        params: &TableParams,
    ) -> Result<Self> {
        if crop_box.width <= 0.0 || crop_box.height <= 0.0 {
            return Err(TableError::InvalidCropBox {
                width: crop_box.width,
                height: crop_box.height,
            });
        }

        let mut elements: Vec<TextElement> = Vec::with_capacity(glyphs.len());
        let mut total_height = 0.0;
        let mut seen = 0usize;
        let mut dropped = 0usize;

        for (i, g) in glyphs.iter().enumerate() {
            if ![g.x, g.y, g.width, g.height].iter().all(|v| v.is_finite()) {
                return Err(TableError::NonFiniteGlyph { index: i });
            }
            if !g.text.chars().any(|c| !c.is_control()) {
                dropped += 1;
                continue;
            }
            let text = if g.text == NBSP { " " } else { g.text.as_str() };

            let element = TextElement::new(
                round2(g.y),
                round2(g.x),
                round2(g.width),
                round2(g.height),
                g.font,
                g.font_size,
                text,
                g.width_of_space,
                g.direction,
            );

            seen += 1;
            total_height += element.rect().height;
            let avg_height = total_height / seen as f64;

            if text.trim().is_empty() {
                // a blank far taller than its neighbors is an artifact, not
                // a space
                if avg_height > 0.0
                    && element.rect().height >= avg_height * params.blank_height_multiplier
                {
                    dropped += 1;
                    continue;
                }
                if g.font_size > params.max_blank_font_size
                    || g.font_size < params.min_blank_font_size
                {
                    dropped += 1;
                    continue;
                }
            }
            elements.push(element);
        }

        let mut rulings: Vec<Ruling> = Vec::with_capacity(segments.len());
        for (i, segment) in segments.iter().enumerate() {
            let finite = [segment.p1.0, segment.p1.1, segment.p2.0, segment.p2.1]
                .iter()
                .all(|v| v.is_finite());
            if !finite {
                return Err(TableError::NonFiniteSegment { index: i });
            }
            let mut ruling = Ruling {
                x1: segment.p1.0,
                y1: segment.p1.1,
                x2: segment.p2.0,
                y2: segment.p2.1,
            };
            ruling.normalize(params.normalize_angle_tolerance);
            if ruling.length() > params.ruling_min_length {
                rulings.push(ruling);
            }
        }

        debug!(
            page = page_number,
            glyphs = elements.len(),
            dropped_glyphs = dropped,
            rulings = rulings.len(),
            "ingested page content"
        );
        Ok(Self::from_parts(crop_box, page_number, elements, rulings))
    }

    /// Assemble a page from already-filtered parts.
    pub fn from_parts(
        rect: Rect,
        page_number: u32,
        glyphs: Vec<TextElement>,
        rulings: Vec<Ruling>,
    ) -> Self {
        Self {
            rect,
            page_number,
            rulings,
            index: RectangleSpatialIndex::build(glyphs),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// 1-based page number.
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Every glyph on the page, in decoder order.
    pub fn text(&self) -> &[TextElement] {
        self.index.items()
    }

    /// Glyphs contained in `area`, in visual order.
    pub fn text_in(&self, area: &Rect) -> Vec<TextElement> {
        self.index.contains(area)
    }

    /// All rulings on the page, as ingested.
    pub fn rulings(&self) -> &[Ruling] {
        &self.rulings
    }

    /// Horizontal rulings, collapsed into clean maximal segments.
    pub fn horizontal_rulings(&self, params: &TableParams) -> Vec<Ruling> {
        let horizontals: Vec<Ruling> = self
            .rulings
            .iter()
            .filter(|r| r.horizontal())
            .copied()
            .collect();
        collapse_oriented_rulings(horizontals, params)
    }

    /// Vertical rulings, collapsed into clean maximal segments.
    pub fn vertical_rulings(&self, params: &TableParams) -> Vec<Ruling> {
        let verticals: Vec<Ruling> = self
            .rulings
            .iter()
            .filter(|r| r.vertical())
            .copied()
            .collect();
        collapse_oriented_rulings(verticals, params)
    }

    /// The minimal rectangle containing every glyph.
    ///
    /// Fails on a page without text.
    pub fn text_bounds(&self) -> Result<Rect> {
        self.index.bounds()
    }

    /// A sub-area holding the glyphs contained in `area` and the rulings
    /// clipped to it.
    pub fn crop(&self, area: Rect) -> PageArea {
        let glyphs = self.index.contains(&area);
        let rulings = crop_rulings_to_area(&self.rulings, &area);
        Self::from_parts(area, self.page_number, glyphs, rulings)
    }
}
