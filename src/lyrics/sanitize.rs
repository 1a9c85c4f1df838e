//! Composite cleanup passes built on the normalizer and annotation stripping.

use crate::lyrics::annotations::{
    strip_all_annotations, strip_instrument_annotations, strip_structure_annotations,
};
use crate::lyrics::normalize::{clean_whitespace, collapse_blank_lines, normalize};

/// Normalize raw lyrics and drop instrument cues, keeping structure markers
/// so the text can be segmented.
pub fn prepare_for_segmentation(raw: &str) -> String {
    let text = strip_instrument_annotations(&normalize(raw));
    collapse_blank_lines(&clean_whitespace(&text))
}

/// Produce the sanitized lyric used for rhyme statistics: normalized, with
/// instrument and structure annotations removed and, when `strip_all` is
/// set, every other bracketed annotation as well.
pub fn sanitize(raw: &str, strip_all: bool) -> String {
    let mut text = strip_structure_annotations(&prepare_for_segmentation(raw));
    if strip_all {
        text = strip_all_annotations(&text);
    }
    collapse_blank_lines(&clean_whitespace(&text))
}
