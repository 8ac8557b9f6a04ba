//! Table extractors: lattice (drawn grids) and stream (text alignment).

mod detect;
mod lattice;
mod stream;

pub use detect::detect_table_regions;
pub use lattice::{find_cells, find_table_regions, LatticeExtractor};
pub use stream::{column_positions, StreamExtractor};
