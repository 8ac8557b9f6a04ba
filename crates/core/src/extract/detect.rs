//! Table region detection without text placement.

use crate::config::TableParams;
use crate::geom::Rect;
use crate::page::PageArea;

use super::lattice::{find_cells, find_table_regions};

/// Propose the regions of ruled tables on a page, without filling any text.
///
/// Useful for callers that only need to know where tables sit, e.g. to
/// route regions to different extractors.
pub fn detect_table_regions(page: &PageArea, params: &TableParams) -> Vec<Rect> {
    let cells = find_cells(
        &page.horizontal_rulings(params),
        &page.vertical_rulings(params),
        params,
    );
    find_table_regions(&cells)
}
