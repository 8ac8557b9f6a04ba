//! Text model: glyphs, word chunks, lines, and the word merger.

mod chunk;
mod element;
mod line;
mod words;

pub use chunk::TextChunk;
pub use element::{FontId, TextElement};
pub use line::{group_by_lines, Line};
pub use words::merge_words;
