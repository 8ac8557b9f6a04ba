//! Extraction parameters.
//!
//! Contains the [`TableParams`] struct for controlling geometric tolerances
//! and text-grouping heuristics, plus the two numeric constants that every
//! coordinate comparison in the crate agrees on.

/// Tolerance for fuzzy coordinate equality.
///
/// Two coordinates within `EPS` of each other are considered equal. This is
/// a crate constant rather than a parameter: hash keys, sort orders, and
/// point-set cancellation all have to agree on the same notion of equality.
pub const EPS: f64 = 0.01;

/// Number of decimal places kept when coordinates are used as map keys.
pub const ROUND_DECIMALS: i32 = 2;

/// Parameters for table extraction.
///
/// Controls how line fragments are fused into rulings, how glyphs are grouped
/// into words, and how the lattice/stream choice heuristic behaves.
#[derive(Debug, Clone, PartialEq)]
pub struct TableParams {
    /// Expansion applied to both rulings of a perpendicular pair before
    /// testing for an intersection.
    pub perpendicular_expand: f64,

    /// Expansion applied to both rulings of a colinear or parallel pair
    /// before testing for an intersection. Smaller than the perpendicular
    /// amount since both sides get expanded.
    pub colinear_expand: f64,

    /// Segments within this many degrees of horizontal or vertical are
    /// snapped to be strictly horizontal or vertical.
    pub normalize_angle_tolerance: f64,

    /// Segments shorter than this are dropped at ingestion.
    pub ruling_min_length: f64,

    /// Fraction of the running average character width used when estimating
    /// the expected gap before the next word.
    pub average_char_tolerance: f64,

    /// Fraction of the space width used when estimating the expected gap
    /// before the next word.
    pub word_spacing_tolerance: f64,

    /// Vertical-overlap ratio above which two rectangles are ordered
    /// left-to-right instead of top-to-bottom.
    pub vertical_comparison_threshold: f64,

    /// Bounds of the lattice/stream row-and-column ratio inside which a page
    /// counts as tabular.
    pub heuristic_ratio: f64,

    /// Blank glyphs taller than the running average height times this
    /// multiplier are dropped at ingestion.
    pub blank_height_multiplier: f64,

    /// Blank glyphs with a font size below this are dropped at ingestion.
    pub min_blank_font_size: f64,

    /// Blank glyphs with a font size above this are dropped at ingestion.
    pub max_blank_font_size: f64,
}

impl Default for TableParams {
    fn default() -> Self {
        Self {
            perpendicular_expand: 2.0,
            colinear_expand: 1.0,
            normalize_angle_tolerance: 1.0,
            ruling_min_length: 0.01,
            average_char_tolerance: 0.3,
            word_spacing_tolerance: 0.5,
            vertical_comparison_threshold: 0.4,
            heuristic_ratio: 0.65,
            blank_height_multiplier: 6.0,
            min_blank_font_size: 2.0,
            max_blank_font_size: 40.0,
        }
    }
}
