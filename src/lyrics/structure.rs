//! Structural features of a song's label sequence.
//!
//! Every feature is undefined when the raw lyric contains no `[...]` at all.
//! That check looks at the raw text, not at the segmentation result, because
//! unannotated lyrics still segment into one `Unknown` block.

use crate::lyrics::annotations::contains_annotations;
use crate::lyrics::sanitize::prepare_for_segmentation;
use crate::lyrics::segment::{label_sequence, segment};
use crate::types::{FeatureValue, SegmentLabel};

/// Label sequence of one lyric plus the annotation pre-check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureAnalysis {
    annotated: bool,
    labels: Vec<SegmentLabel>,
}

impl StructureAnalysis {
    /// Segment a raw lyric and keep its label sequence.
    pub fn from_raw(raw: &str) -> Self {
        if !contains_annotations(raw) {
            return Self { annotated: false, labels: Vec::new() };
        }
        Self::from_labels(label_sequence(&segment(&prepare_for_segmentation(raw))))
    }

    /// Build directly from a label sequence (treated as annotated).
    pub const fn from_labels(labels: Vec<SegmentLabel>) -> Self {
        Self { annotated: true, labels }
    }

    /// Whether the raw lyric had any annotation.
    pub const fn is_annotated(&self) -> bool {
        self.annotated
    }

    /// The label sequence (empty for unannotated lyrics).
    pub fn labels(&self) -> &[SegmentLabel] {
        &self.labels
    }

    fn gate(&self, value: impl FnOnce(&[SegmentLabel]) -> FeatureValue) -> FeatureValue {
        if self.annotated {
            value(&self.labels)
        } else {
            FeatureValue::Undefined
        }
    }

    /// Number of verse segments.
    pub fn number_of_verses(&self) -> FeatureValue {
        self.gate(|l| count(l, SegmentLabel::Verse).into())
    }

    /// Number of chorus segments.
    pub fn number_of_choruses(&self) -> FeatureValue {
        self.gate(|l| count(l, SegmentLabel::Chorus).into())
    }

    /// Number of verse and chorus segments together.
    pub fn number_of_sections(&self) -> FeatureValue {
        self.gate(|l| (count(l, SegmentLabel::Verse) + count(l, SegmentLabel::Chorus)).into())
    }

    /// Whether the first segment is a chorus.
    pub fn starts_with_chorus(&self) -> FeatureValue {
        self.gate(|l| starts_with_chorus(l).into())
    }

    /// Verses over verses plus choruses; undefined when there are neither.
    pub fn verse_share(&self) -> FeatureValue {
        self.gate(|l| share(l, SegmentLabel::Verse).map_or(FeatureValue::Undefined, FeatureValue::Ratio))
    }

    /// Choruses over verses plus choruses; undefined when there are neither.
    pub fn chorus_share(&self) -> FeatureValue {
        self.gate(|l| share(l, SegmentLabel::Chorus).map_or(FeatureValue::Undefined, FeatureValue::Ratio))
    }

    /// Whether the last two segments are both choruses.
    pub fn ends_with_two_chorus_repetitions(&self) -> FeatureValue {
        self.gate(|l| ends_with_two_choruses(l).into())
    }

    /// Whether the sequence is strictly Verse, Chorus, Verse, Chorus, ...
    pub fn alternating_verse_chorus(&self) -> FeatureValue {
        self.gate(|l| alternating_verse_chorus(l).into())
    }

    /// Whether every pair of consecutive verses has a chorus between them.
    pub fn two_verses_at_least_one_chorus_between(&self) -> FeatureValue {
        self.gate(|l| separated_by(l, SegmentLabel::Verse, SegmentLabel::Chorus).into())
    }

    /// Whether every pair of consecutive choruses has a verse between them.
    pub fn two_choruses_at_least_one_verse_between(&self) -> FeatureValue {
        self.gate(|l| separated_by(l, SegmentLabel::Chorus, SegmentLabel::Verse).into())
    }
}

/// Occurrences of one label.
pub fn count(labels: &[SegmentLabel], label: SegmentLabel) -> usize {
    labels.iter().filter(|&&l| l == label).count()
}

/// First label is a chorus.
pub fn starts_with_chorus(labels: &[SegmentLabel]) -> bool {
    labels.first() == Some(&SegmentLabel::Chorus)
}

/// Share of `label` among verse and chorus labels, if there are any.
pub fn share(labels: &[SegmentLabel], label: SegmentLabel) -> Option<f64> {
    let total = count(labels, SegmentLabel::Verse) + count(labels, SegmentLabel::Chorus);
    (total > 0).then(|| count(labels, label) as f64 / total as f64)
}

/// The last two labels are both chorus.
pub fn ends_with_two_choruses(labels: &[SegmentLabel]) -> bool {
    matches!(labels, [.., SegmentLabel::Chorus, SegmentLabel::Chorus])
}

/// Even positions are verses, odd positions are choruses.
pub fn alternating_verse_chorus(labels: &[SegmentLabel]) -> bool {
    labels.iter().enumerate().all(|(i, &l)| {
        let expected = if i % 2 == 0 { SegmentLabel::Verse } else { SegmentLabel::Chorus };
        l == expected
    })
}

/// Between every two consecutive `outer` labels there is at least one `inner` label.
/// Holds trivially with fewer than two `outer` labels.
pub fn separated_by(labels: &[SegmentLabel], outer: SegmentLabel, inner: SegmentLabel) -> bool {
    let positions: Vec<usize> = labels
        .iter()
        .enumerate()
        .filter(|&(_, &l)| l == outer)
        .map(|(i, _)| i)
        .collect();

    positions
        .windows(2)
        .all(|pair| labels[pair[0] + 1..pair[1]].contains(&inner))
}

/// Case-insensitive, non-overlapping occurrences of the title in the lyric.
pub fn title_occurrences(raw: &str, title: &str) -> usize {
    let title = title.trim().to_lowercase();
    if title.is_empty() {
        return 0;
    }
    raw.to_lowercase().matches(title.as_str()).count()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::SegmentLabel::{Bridge, Chorus, Verse};

    fn flag(value: FeatureValue) -> bool {
        match value {
            FeatureValue::Flag(b) => b,
            other => panic!("Expected Flag, got {other:?}"),
        }
    }

    #[test]
    fn alternating_pattern() {
        let check = |labels: Vec<SegmentLabel>| {
            flag(StructureAnalysis::from_labels(labels).alternating_verse_chorus())
        };
        assert!(check(vec![Verse, Chorus, Verse, Chorus]));
        assert!(check(vec![Verse, Chorus, Verse]));
        assert!(!check(vec![Verse, Verse, Chorus]));
        assert!(!check(vec![Verse, Chorus, Bridge, Chorus]));
    }

    #[test]
    fn verses_separated_by_chorus() {
        let check = |labels: Vec<SegmentLabel>| {
            flag(StructureAnalysis::from_labels(labels).two_verses_at_least_one_chorus_between())
        };
        assert!(check(vec![Verse, Chorus, Chorus, Verse, Chorus]));
        assert!(!check(vec![Verse, Verse, Chorus]));
        assert!(check(vec![Chorus, Verse]));
    }

    #[test]
    fn choruses_separated_by_verse() {
        // Checks for an intervening verse; an intervening chorus can never
        // exist between two consecutive chorus positions.
        let check = |labels: Vec<SegmentLabel>| {
            flag(StructureAnalysis::from_labels(labels).two_choruses_at_least_one_verse_between())
        };
        assert!(check(vec![Verse, Verse, Chorus, Verse, Chorus]));
        assert!(!check(vec![Verse, Chorus, Bridge, Chorus]));
        assert!(!check(vec![Chorus, Chorus]));
    }

    #[test]
    fn ends_with_two_choruses_needs_both() {
        let check = |labels: Vec<SegmentLabel>| {
            flag(StructureAnalysis::from_labels(labels).ends_with_two_chorus_repetitions())
        };
        assert!(check(vec![Verse, Chorus, Chorus]));
        assert!(!check(vec![Chorus, Verse]));
        assert!(!check(vec![Chorus]));
    }

    #[test]
    fn shares_need_a_denominator() {
        let analysis = StructureAnalysis::from_labels(vec![Verse, Chorus, Chorus, Bridge]);
        assert_eq!(analysis.verse_share(), FeatureValue::Ratio(1.0 / 3.0));
        assert_eq!(analysis.number_of_sections(), FeatureValue::Count(3));
        assert_eq!(share(&[Bridge], Chorus), None);
        assert_eq!(
            StructureAnalysis::from_labels(vec![Bridge]).chorus_share(),
            FeatureValue::Undefined
        );
    }

    #[test]
    fn unannotated_lyrics_are_undefined_everywhere() {
        let analysis = StructureAnalysis::from_raw("just some words\nno markers here");
        assert!(!analysis.is_annotated());
        for value in [
            analysis.number_of_verses(),
            analysis.number_of_choruses(),
            analysis.number_of_sections(),
            analysis.starts_with_chorus(),
            analysis.verse_share(),
            analysis.chorus_share(),
            analysis.ends_with_two_chorus_repetitions(),
            analysis.alternating_verse_chorus(),
            analysis.two_verses_at_least_one_chorus_between(),
            analysis.two_choruses_at_least_one_verse_between(),
        ] {
            assert_eq!(value, FeatureValue::Undefined);
        }
    }

    #[test]
    fn annotated_lyrics_are_measured() {
        let raw = "[Verse 1]\na\n[Chorus]\nb\n[Guitar Solo]\n[Verse 2]\nc\n[Chorus]\nb";
        let analysis = StructureAnalysis::from_raw(raw);
        assert_eq!(analysis.labels(), &[Verse, Chorus, Verse, Chorus]);
        assert_eq!(analysis.alternating_verse_chorus(), FeatureValue::Flag(true));
        assert_eq!(analysis.number_of_sections(), FeatureValue::Count(4));
        assert_eq!(analysis.verse_share(), FeatureValue::Ratio(0.5));
        assert_eq!(analysis.starts_with_chorus(), FeatureValue::Flag(false));
    }

    #[test]
    fn bracket_without_structure_still_defines_features() {
        let analysis = StructureAnalysis::from_raw("hey [x2]\nyou");
        assert!(analysis.is_annotated());
        assert_eq!(analysis.labels(), &[SegmentLabel::Unknown]);
        assert_eq!(analysis.verse_share(), FeatureValue::Undefined);
        assert_eq!(analysis.alternating_verse_chorus(), FeatureValue::Flag(false));
    }

    #[test]
    fn title_count_is_case_insensitive() {
        assert_eq!(title_occurrences("Hey Jude, hey jude\nHEY JUDE", "Hey Jude"), 3);
        assert_eq!(title_occurrences("anything", "  "), 0);
    }
}
