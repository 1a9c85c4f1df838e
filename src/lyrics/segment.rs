//! Segmentation of normalized lyrics into labeled blocks.
//!
//! A single-state machine walks the lines: a structure annotation closes the
//! open segment and opens a new one, any other line is appended to the open
//! segment (opening an `Unknown` segment first when none is open yet).

use crate::lyrics::annotations::classify_line;
use crate::types::{Segment, SegmentLabel};

/// Append-only buffer for the segment currently being filled.
#[derive(Debug)]
struct OpenSegment {
    label: SegmentLabel,
    lines: Vec<String>,
}

impl OpenSegment {
    const fn new(label: SegmentLabel) -> Self {
        Self { label, lines: Vec::new() }
    }

    /// Close the buffer, dropping blank lines at both ends.
    fn finish(self) -> Segment {
        let mut lines = self.lines;
        let first = lines.iter().position(|l| !l.trim().is_empty());
        let last = lines.iter().rposition(|l| !l.trim().is_empty());

        let lines = match (first, last) {
            (Some(first), Some(last)) => lines.drain(first..=last).collect(),
            _ => Vec::new(),
        };

        Segment { label: self.label, lines }
    }
}

/// Split normalized text into segments, in document order.
///
/// Instrument annotations must be stripped beforehand (see
/// [`crate::lyrics::sanitize::prepare_for_segmentation`]). Text without any
/// structure annotation yields a single `Unknown` segment.
pub fn segment(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut open: Option<OpenSegment> = None;

    for line in text.split('\n') {
        if let Some(label) = classify_line(line) {
            if let Some(done) = open.take() {
                segments.push(done.finish());
            }
            open = Some(OpenSegment::new(label));
            continue;
        }

        open.get_or_insert_with(|| OpenSegment::new(SegmentLabel::Unknown))
            .lines
            .push(line.to_string());
    }

    if let Some(done) = open {
        segments.push(done.finish());
    }

    segments
}

/// The label of every segment, in order.
pub fn label_sequence(segments: &[Segment]) -> Vec<SegmentLabel> {
    segments.iter().map(|s| s.label).collect()
}
