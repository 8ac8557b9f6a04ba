//! Lattice extraction: tables recovered from drawn ruling lines.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use super::stream::StreamExtractor;
use crate::config::TableParams;
use crate::geom::{
    collapse_oriented_rulings, feq, find_intersections, sort_visually, HasRect, PointKey, Rect,
    Ruling,
};
use crate::page::PageArea;
use crate::table::{Cell, RuledTable};
use crate::text::merge_words;

/// Discover atomic cells from collapsed horizontal and vertical rulings.
///
/// Every intersection point is tried as a top-left corner; the candidate
/// corners below it and to its right must sit on the same vertical and
/// horizontal edge respectively, and the implied bottom-right point must
/// exist with matching edges on its own sides. The first match wins, which
/// yields the smallest rectangle for that corner. A cell therefore needs
/// all four of its edges drawn; nothing is synthesized for open grids.
pub fn find_cells(
    horizontals: &[Ruling],
    verticals: &[Ruling],
    params: &TableParams,
) -> Vec<Cell> {
    let intersections = find_intersections(horizontals, verticals, params);
    let points: Vec<PointKey> = intersections.keys().copied().collect();
    let mut cells = Vec::new();

    for (i, top_left) in points.iter().enumerate() {
        let (h_tl, v_tl) = &intersections[top_left];

        let mut below: Vec<&PointKey> = Vec::new();
        let mut right: Vec<&PointKey> = Vec::new();
        for p in &points[i..] {
            if p.x() == top_left.x() && p.y() > top_left.y() {
                below.push(p);
            }
            if p.y() == top_left.y() && p.x() > top_left.x() {
                right.push(p);
            }
        }

        'candidates: for below_point in &below {
            // the vertical edge must continue from the top-left corner down
            if &intersections[*below_point].1 != v_tl {
                continue;
            }
            for right_point in &right {
                // and the horizontal edge must continue to the right
                if &intersections[*right_point].0 != h_tl {
                    continue;
                }
                let bottom_right = PointKey::of(right_point.x(), below_point.y());
                if let Some((h_br, v_br)) = intersections.get(&bottom_right) {
                    if h_br == &intersections[*below_point].0
                        && v_br == &intersections[*right_point].1
                    {
                        cells.push(Cell::new(
                            (top_left.x(), top_left.y()),
                            (bottom_right.x(), bottom_right.y()),
                        ));
                        break 'candidates;
                    }
                }
            }
        }
    }

    debug!(
        intersections = points.len(),
        cells = cells.len(),
        "discovered cells"
    );
    cells
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum WalkDirection {
    Horizontal,
    Vertical,
}

/// Recover the bounding box of each table region from its cells.
///
/// The corner points of all cells are cancelled pairwise: a point shared by
/// an even number of cells is interior and vanishes, leaving only outline
/// vertices. Those are paired into horizontal and vertical edges and walked
/// into closed polygons, whose bounding boxes are the regions. Inputs whose
/// surviving point count is odd are malformed (overlapping, non-grid-aligned
/// cells) and produce no regions.
pub fn find_table_regions(cells: &[Cell]) -> Vec<Rect> {
    if cells.is_empty() {
        return Vec::new();
    }

    // dedup cells by corner coordinates
    let mut seen: BTreeSet<(PointKey, PointKey)> = BTreeSet::new();
    let mut unique: Vec<&Cell> = Vec::new();
    for cell in cells {
        let rect = cell.rect();
        let key = (
            PointKey::of(rect.left, rect.top),
            PointKey::of(rect.right(), rect.bottom()),
        );
        if seen.insert(key) {
            unique.push(cell);
        }
    }

    // XOR of corner points: toggling removes interior/shared vertices
    let mut point_set: BTreeSet<PointKey> = BTreeSet::new();
    for cell in &unique {
        for (x, y) in cell.rect().points() {
            let key = PointKey::of(x, y);
            if !point_set.insert(key) {
                point_set.remove(&key);
            }
        }
    }

    if point_set.len() % 2 == 1 {
        warn!(
            points = point_set.len(),
            "odd outline point count; cells are not grid-aligned"
        );
        return Vec::new();
    }

    // row-major order is the set's natural order
    let by_y: Vec<PointKey> = point_set.iter().copied().collect();
    let mut by_x = by_y.clone();
    by_x.sort_by(|a, b| (a.x(), a.y()).partial_cmp(&(b.x(), b.y())).unwrap());

    let mut edges_h: BTreeMap<PointKey, PointKey> = BTreeMap::new();
    let mut edges_v: BTreeMap<PointKey, PointKey> = BTreeMap::new();

    // pair consecutive points sharing a y into horizontal edges
    let mut i = 0;
    while i < by_y.len() {
        let current_y = by_y[i].y();
        while i + 1 < by_y.len() && feq(by_y[i].y(), current_y) {
            edges_h.insert(by_y[i], by_y[i + 1]);
            edges_h.insert(by_y[i + 1], by_y[i]);
            i += 2;
        }
        if i + 1 >= by_y.len() {
            break;
        }
    }

    // and consecutive points sharing an x into vertical edges
    let mut i = 0;
    while i < by_x.len() {
        let current_x = by_x[i].x();
        while i + 1 < by_x.len() && feq(by_x[i].x(), current_x) {
            edges_v.insert(by_x[i], by_x[i + 1]);
            edges_v.insert(by_x[i + 1], by_x[i]);
            i += 2;
        }
        if i + 1 >= by_x.len() {
            break;
        }
    }

    // walk the edge maps into closed polygons, alternating directions
    let mut polygons: Vec<Vec<PointKey>> = Vec::new();
    while !edges_h.is_empty() {
        let start = *edges_h.keys().next().expect("edges_h is non-empty");
        let mut polygon: Vec<(PointKey, WalkDirection)> = vec![(start, WalkDirection::Horizontal)];
        edges_h.remove(&start);

        loop {
            let &(current, direction) = polygon.last().expect("polygon starts non-empty");
            let next = match direction {
                WalkDirection::Horizontal => edges_v.remove(&current),
                WalkDirection::Vertical => edges_h.remove(&current),
            };
            let Some(next_point) = next else {
                warn!("outline walk hit a dead end; cells are not grid-aligned");
                return Vec::new();
            };
            let next_direction = match direction {
                WalkDirection::Horizontal => WalkDirection::Vertical,
                WalkDirection::Vertical => WalkDirection::Horizontal,
            };
            polygon.push((next_point, next_direction));

            if next_point == polygon[0].0 {
                polygon.pop();
                break;
            }
        }

        for (point, _) in &polygon {
            edges_h.remove(point);
            edges_v.remove(point);
        }
        polygons.push(polygon.into_iter().map(|(point, _)| point).collect());
    }

    polygons
        .iter()
        .map(|polygon| {
            let mut top = f64::MAX;
            let mut left = f64::MAX;
            let mut bottom = f64::MIN;
            let mut right = f64::MIN;
            for point in polygon {
                top = top.min(point.y());
                left = left.min(point.x());
                bottom = bottom.max(point.y());
                right = right.max(point.x());
            }
            Rect::new(top, left, right - left, bottom - top)
        })
        .collect()
}

/// Extracts tables from the rulings drawn on a page.
#[derive(Debug, Clone, Default)]
pub struct LatticeExtractor {
    params: TableParams,
}

impl LatticeExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: TableParams) -> Self {
        Self { params }
    }

    /// Extract every ruled table on the page.
    pub fn extract(&self, page: &PageArea) -> Vec<RuledTable> {
        self.extract_with_rulings(page, page.rulings())
    }

    /// Extract using an explicit set of rulings instead of the page's own.
    pub fn extract_with_rulings(&self, page: &PageArea, rulings: &[Ruling]) -> Vec<RuledTable> {
        let horizontals: Vec<Ruling> = rulings.iter().filter(|r| r.horizontal()).copied().collect();
        let verticals: Vec<Ruling> = rulings.iter().filter(|r| r.vertical()).copied().collect();
        let horizontals = collapse_oriented_rulings(horizontals, &self.params);
        let verticals = collapse_oriented_rulings(verticals, &self.params);

        let cells = find_cells(&horizontals, &verticals, &self.params);
        let regions = find_table_regions(&cells);

        let mut tables: Vec<RuledTable> = Vec::new();
        for region in regions {
            let mut region_cells: Vec<Cell> = Vec::new();
            for cell in &cells {
                if cell.rect().intersects(&region) {
                    let mut filled = cell.clone();
                    let glyphs = page.text_in(&filled.rect());
                    filled.set_chunks(merge_words(&glyphs, &[], &self.params));
                    region_cells.push(filled);
                }
            }

            let region_horizontals: Vec<Ruling> = horizontals
                .iter()
                .filter(|r| r.intersects_rect(&region))
                .copied()
                .collect();
            let region_verticals: Vec<Ruling> = verticals
                .iter()
                .filter(|r| r.intersects_rect(&region))
                .copied()
                .collect();

            tables.push(RuledTable::new(
                region,
                region_cells,
                region_horizontals,
                region_verticals,
                page.page_number(),
            ));
        }

        sort_visually(&mut tables);
        debug!(
            page = page.page_number(),
            tables = tables.len(),
            "lattice extraction finished"
        );
        tables
    }

    /// Whether the page reads as a ruled table.
    ///
    /// Both extractors are run over the minimal text bounding box; the page
    /// counts as tabular when their row and column counts roughly agree.
    pub fn is_tabular(&self, page: &PageArea) -> bool {
        if page.text().is_empty() {
            return false;
        }
        let Ok(bounds) = page.text_bounds() else {
            return false;
        };
        let minimal = page.crop(bounds);

        let ruled = self.extract(&minimal);
        let Some(first) = ruled.first() else {
            return false;
        };
        let rows_by_lines = first.table().row_count() as f64;
        let cols_by_lines = first.table().col_count() as f64;

        let streamed = StreamExtractor::with_params(self.params.clone()).extract(&minimal);
        let Some(table) = streamed.first() else {
            return false;
        };
        let rows_without_lines = table.row_count() as f64;
        let cols_without_lines = table.col_count() as f64;
        if rows_without_lines == 0.0 || cols_without_lines == 0.0 {
            return false;
        }

        let ratio =
            (cols_by_lines / cols_without_lines + rows_by_lines / rows_without_lines) / 2.0;
        ratio > self.params.heuristic_ratio && ratio < 1.0 / self.params.heuristic_ratio
    }
}
