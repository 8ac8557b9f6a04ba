//! Error types for the table extraction core.

use thiserror::Error;

/// Primary error type for table extraction operations.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("bounding box of an empty collection is undefined")]
    EmptyBoundingBox,

    #[error("cannot regroup an empty text chunk")]
    EmptyChunk,

    #[error("page crop box has non-positive extent: {width}x{height}")]
    InvalidCropBox { width: f64, height: f64 },

    #[error("glyph {index} has a non-finite coordinate")]
    NonFiniteGlyph { index: usize },

    #[error("segment {index} has a non-finite endpoint")]
    NonFiniteSegment { index: usize },
}

/// Convenience Result type alias for TableError.
pub type Result<T> = std::result::Result<T, TableError>;
