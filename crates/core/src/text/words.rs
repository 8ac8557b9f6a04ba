//! Glyph-to-word merging.
//!
//! Walks a reading-ordered glyph list and decides, one glyph at a time,
//! whether it continues the current word chunk or starts a new one. The
//! decision weighs the font's space width against a running average of
//! character widths, injects synthetic spaces where a word gap is implied
//! but not drawn, and refuses to merge across vertical rulings.

use tracing::debug;

use super::chunk::TextChunk;
use super::element::TextElement;
use crate::config::TableParams;
use crate::geom::{bands_overlap, feq, HasRect, Ruling};

/// Whether a glyph's vertical extent overlaps a ruling's vertical extent.
fn overlaps_ruling_band(element: &TextElement, ruling: &Ruling) -> bool {
    let rect = element.rect();
    let lo = ruling.y1.min(ruling.y2);
    let hi = ruling.y1.max(ruling.y2);
    (rect.bottom().min(hi) - rect.top.max(lo)) > 0.0
}

/// Whether any vertical ruling runs between the two glyphs, overlapping
/// both vertically.
fn across_vertical_ruling(
    prev: &TextElement,
    current: &TextElement,
    vertical_rulings: &[Ruling],
) -> bool {
    let prev_x = prev.rect().left;
    let cur_x = current.rect().left;
    vertical_rulings.iter().any(|r| {
        let position = r.left();
        let between =
            (prev_x < position && cur_x > position) || (prev_x > position && cur_x < position);
        between && overlaps_ruling_band(prev, r) && overlaps_ruling_band(current, r)
    })
}

/// Merge a reading-ordered glyph list into word chunks.
///
/// `vertical_rulings` act as column barriers: glyphs on opposite sides of a
/// ruling never share a chunk. The input slice is left untouched.
pub fn merge_words(
    glyphs: &[TextElement],
    vertical_rulings: &[Ruling],
    params: &TableParams,
) -> Vec<TextChunk> {
    let mut chunks: Vec<TextChunk> = Vec::new();
    if glyphs.is_empty() {
        return chunks;
    }

    let mut remaining = glyphs.iter();
    let first = remaining
        .next()
        .expect("glyphs is non-empty")
        .clone();
    let first_rect = first.rect();
    chunks.push(TextChunk::of(first));

    let mut previous_avg_char_width = first_rect.width;
    let mut end_of_last_text_x = first_rect.right();
    let mut max_y_for_line = first_rect.bottom();
    let mut max_height_for_line = first_rect.height;
    let mut last_word_spacing = -1.0_f64;

    for glyph in remaining {
        let current = chunks.last_mut().expect("at least one chunk exists");
        let prev = current
            .elements()
            .last()
            .expect("chunks always hold at least one glyph")
            .clone();
        let rect = glyph.rect();
        let prev_rect = prev.rect();

        // a duplicate glyph drawn on top of itself (e.g. faux bold)
        if glyph.text() == prev.text() && prev_rect.overlap_ratio(&rect) > 0.5 {
            continue;
        }

        // a space stamped exactly over the previous glyph
        if glyph.text() == " " && feq(prev_rect.left, rect.left) && feq(prev_rect.top, rect.top) {
            continue;
        }

        // a font or size change invalidates the running width average
        if glyph.font() != prev.font() || !feq(glyph.font_size(), prev.font_size()) {
            previous_avg_char_width = -1.0;
        }

        let across_ruling = across_vertical_ruling(&prev, glyph, vertical_rulings);

        // expected gap from the font's space width
        let word_spacing = glyph.width_of_space();
        let delta_space = if word_spacing.is_nan() || word_spacing == 0.0 {
            f64::MAX
        } else if last_word_spacing < 0.0 {
            word_spacing * params.word_spacing_tolerance
        } else {
            (word_spacing + last_word_spacing) / 2.0 * params.word_spacing_tolerance
        };

        // expected gap from the running average character width; not a true
        // average of averages, but the variant that behaves best in practice
        let char_count = glyph.text().chars().count().max(1) as f64;
        let avg_char_width = if previous_avg_char_width < 0.0 {
            rect.width / char_count
        } else {
            (previous_avg_char_width + rect.width / char_count) / 2.0
        };
        let delta_char_width = avg_char_width * params.average_char_tolerance;

        let mut expected_start_of_next_word = -f64::MAX;
        if end_of_last_text_x != -1.0 {
            expected_start_of_next_word = end_of_last_text_x + delta_char_width.min(delta_space);
        }

        let mut same_line = true;
        if !bands_overlap(rect.bottom(), rect.height, max_y_for_line, max_height_for_line) {
            end_of_last_text_x = -1.0;
            expected_start_of_next_word = -f64::MAX;
            max_y_for_line = -f64::MAX;
            max_height_for_line = -1.0;
            same_line = false;
        }

        end_of_last_text_x = rect.right();

        // inject a synthetic space when the geometry implies a word gap that
        // was never drawn
        let mut space: Option<TextElement> = None;
        if !across_ruling
            && same_line
            && expected_start_of_next_word < rect.left
            && !prev.text().ends_with(' ')
        {
            let sp = TextElement::new(
                prev_rect.top,
                prev_rect.left,
                expected_start_of_next_word - prev_rect.left,
                prev_rect.height,
                prev.font(),
                prev.font_size(),
                " ",
                prev.width_of_space(),
                0.0,
            );
            current.add(sp.clone());
            space = Some(sp);
        }

        max_y_for_line = max_y_for_line.max(rect.bottom());
        max_height_for_line = max_height_for_line.max(rect.height);

        let dist = rect.left
            - space
                .as_ref()
                .map(|sp| sp.rect().right())
                .unwrap_or(prev_rect.right());

        let joins = if dist < 0.0 {
            current.rect().vertically_overlaps(&rect)
        } else {
            dist < word_spacing
        };
        if !across_ruling && same_line && joins {
            current.add(glyph.clone());
        } else {
            chunks.push(TextChunk::of(glyph.clone()));
        }

        last_word_spacing = word_spacing;
        previous_avg_char_width = match &space {
            Some(sp) => (avg_char_width + sp.rect().width) / 2.0,
            None => avg_char_width,
        };
    }

    debug!(glyphs = glyphs.len(), chunks = chunks.len(), "merged words");

    // regroup each chunk so RTL-dominant chunks read right to left;
    // a neutral count is treated as LTR
    chunks
        .into_iter()
        .map(|chunk| {
            let ltr_dominant = chunk.ltr_dominance_sign() != -1;
            match chunk.group_by_directionality(ltr_dominant) {
                Ok(regrouped) => regrouped,
                Err(_) => chunk,
            }
        })
        .collect()
}
