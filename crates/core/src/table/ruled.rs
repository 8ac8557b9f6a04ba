//! Tables assembled from ruling-defined cells.

use std::collections::BTreeSet;

use ordered_float::OrderedFloat;

use super::cell::Cell;
use super::grid::{ExtractionMethod, Table};
use crate::geom::{round2, stable_sort_by, HasRect, Rect, Ruling};

/// A lattice table: the sparse grid plus the cells and rulings that
/// defined it.
#[derive(Debug, Clone)]
pub struct RuledTable {
    table: Table,
    cells: Vec<Cell>,
    horizontal_rulings: Vec<Ruling>,
    vertical_rulings: Vec<Ruling>,
}

impl RuledTable {
    /// Assemble a table from a region and its cells.
    ///
    /// Rows come from the distinct (rounded) cell tops, columns from the
    /// distinct (rounded) cell lefts; every cell lands at the slot of its
    /// own top-left corner, so holes in an incomplete grid stay holes.
    pub fn new(
        region: Rect,
        cells: Vec<Cell>,
        horizontal_rulings: Vec<Ruling>,
        vertical_rulings: Vec<Ruling>,
        page_number: u32,
    ) -> Self {
        let mut table = Table::new(ExtractionMethod::Lattice);
        table.set_rect(region);
        table.set_page_number(page_number);

        let tops: Vec<f64> = distinct_rounded(cells.iter().map(|c| c.rect().top));
        let lefts: Vec<f64> = distinct_rounded(cells.iter().map(|c| c.rect().left));

        let mut ordered = cells.clone();
        stable_sort_by(&mut ordered, |a, b| {
            (round2(a.rect().top), round2(a.rect().left))
                .partial_cmp(&(round2(b.rect().top), round2(b.rect().left)))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for cell in &ordered {
            let row = index_of(&tops, cell.rect().top);
            let col = index_of(&lefts, cell.rect().left);
            table.add(cell.merged_chunk(), row as u32, col as u32);
        }

        Self {
            table,
            cells,
            horizontal_rulings,
            vertical_rulings,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_table(self) -> Table {
        self.table
    }

    /// The discovered cells backing the grid.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Horizontal rulings crossing the table region.
    pub fn horizontal_rulings(&self) -> &[Ruling] {
        &self.horizontal_rulings
    }

    /// Vertical rulings crossing the table region.
    pub fn vertical_rulings(&self) -> &[Ruling] {
        &self.vertical_rulings
    }
}

impl HasRect for RuledTable {
    fn rect(&self) -> Rect {
        self.table.rect()
    }
}

fn distinct_rounded(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let set: BTreeSet<OrderedFloat<f64>> = values.map(|v| OrderedFloat(round2(v))).collect();
    set.into_iter().map(OrderedFloat::into_inner).collect()
}

fn index_of(sorted: &[f64], value: f64) -> usize {
    let rounded = round2(value);
    sorted
        .binary_search_by(|probe| {
            probe
                .partial_cmp(&rounded)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or_else(|insert_at| insert_at)
}
