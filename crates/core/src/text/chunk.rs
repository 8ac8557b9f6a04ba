//! Ordered runs of glyphs forming a word or text fragment.

use unicode_bidi::{bidi_class, BidiClass};

use super::element::TextElement;
use crate::error::{Result, TableError};
use crate::geom::{ill_defined_cmp, HasRect, Rect};

/// The characters a chunk may consist of and still count as whitespace.
pub(crate) const WHITESPACE_CHARS: &[char] = &[' ', '\t', '\r', '\n', '\u{c}'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Ltr,
    Rtl,
    Neutral,
}

fn char_direction(c: char) -> Direction {
    match bidi_class(c) {
        BidiClass::L => Direction::Ltr,
        BidiClass::R | BidiClass::AL => Direction::Rtl,
        _ => Direction::Neutral,
    }
}

/// Direction of a glyph, taken from its first character.
fn element_direction(element: &TextElement) -> Direction {
    element
        .text()
        .chars()
        .next()
        .map(char_direction)
        .unwrap_or(Direction::Neutral)
}

/// An ordered sequence of glyphs plus their enclosing rectangle.
///
/// Chunks come out of the word merger and are only mutated afterwards to
/// absorb another glyph or a sibling chunk.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextChunk {
    rect: Rect,
    elements: Vec<TextElement>,
}

impl TextChunk {
    /// A chunk holding a single glyph.
    pub fn of(element: TextElement) -> Self {
        Self {
            rect: element.rect(),
            elements: vec![element],
        }
    }

    /// The empty sentinel used for absent table cells.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A chunk spanning `rect` with no glyphs yet.
    pub fn with_rect(rect: Rect) -> Self {
        Self {
            rect,
            elements: Vec::new(),
        }
    }

    /// Append a glyph, growing the bound.
    pub fn add(&mut self, element: TextElement) {
        if self.elements.is_empty() && self.rect == Rect::default() {
            self.rect = element.rect();
        } else {
            self.rect.merge(&element.rect());
        }
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[TextElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Concatenated text of the glyphs in stored order, trimmed of the
    /// whitespace the merger injects at word boundaries.
    pub fn text(&self) -> String {
        let joined: String = self.elements.iter().map(TextElement::text).collect();
        joined.trim().to_string()
    }

    /// Whether every character of the chunk is plain whitespace.
    pub fn is_whitespace_only(&self) -> bool {
        self.elements
            .iter()
            .flat_map(|element| element.text().chars())
            .all(|c| WHITESPACE_CHARS.contains(&c))
    }

    /// Sign of (left-to-right glyph count − right-to-left glyph count):
    /// `-1` RTL-dominant, `0` neutral, `+1` LTR-dominant.
    pub fn ltr_dominance_sign(&self) -> i8 {
        let mut ltr = 0usize;
        let mut rtl = 0usize;
        for element in &self.elements {
            for c in element.text().chars() {
                match char_direction(c) {
                    Direction::Ltr => ltr += 1,
                    Direction::Rtl => rtl += 1,
                    Direction::Neutral => {}
                }
            }
        }
        match ltr.cmp(&rtl) {
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Greater => 1,
        }
    }

    /// Absorb another chunk, keeping visual reading order: the other chunk's
    /// glyphs go after ours when we sort before it, otherwise in front.
    pub fn merge(&mut self, other: TextChunk) {
        if ill_defined_cmp(self, &other) == std::cmp::Ordering::Less {
            self.elements.extend(other.elements);
        } else {
            let mut combined = other.elements;
            combined.extend(self.elements.drain(..));
            self.elements = combined;
        }
        if self.rect == Rect::default() {
            self.rect = other.rect;
        } else if other.rect != Rect::default() {
            self.rect.merge(&other.rect);
        }
    }

    /// Rebuild the chunk so its glyphs read logically.
    ///
    /// Glyphs arrive in visual scan order. Runs of glyphs whose direction
    /// opposes the chunk's dominant direction are reversed in place, and for
    /// a right-to-left dominant chunk the run order itself is reversed, so
    /// that the stored order matches reading order. Neutral glyphs extend
    /// the run they follow.
    pub fn group_by_directionality(&self, ltr_dominant: bool) -> Result<TextChunk> {
        if self.elements.is_empty() {
            return Err(TableError::EmptyChunk);
        }

        let mut runs: Vec<(Direction, Vec<TextElement>)> = Vec::new();
        for element in &self.elements {
            let dir = element_direction(element);
            let starts_new_run = match runs.last_mut() {
                Some((run_dir, items)) => {
                    if dir == *run_dir || dir == Direction::Neutral {
                        items.push(element.clone());
                        false
                    } else if *run_dir == Direction::Neutral {
                        *run_dir = dir;
                        items.push(element.clone());
                        false
                    } else {
                        true
                    }
                }
                None => true,
            };
            if starts_new_run {
                runs.push((dir, vec![element.clone()]));
            }
        }

        if !ltr_dominant {
            runs.reverse();
        }
        let mut chunk = TextChunk::empty();
        for (dir, mut items) in runs {
            if dir == Direction::Rtl {
                items.reverse();
            }
            for item in items {
                chunk.add(item);
            }
        }
        Ok(chunk)
    }
}

impl HasRect for TextChunk {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn ltr_dominance(&self) -> i8 {
        self.ltr_dominance_sign()
    }
}
