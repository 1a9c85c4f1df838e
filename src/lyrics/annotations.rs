//! Bracketed annotation handling.
//!
//! An annotation is the span from the first `[` to the last `]` on a line.
//! Classification is a keyword match over the lower-cased span content:
//! instrument cues (`[Guitar Solo]`, `[Spoken]`) are stripped before
//! segmentation, structure markers (`[Verse 2]`, `[Refrain]`) open segments.

use lazy_static::lazy_static;
use regex::Regex;

use crate::constants::annotations::{INSTRUMENT_KEYWORDS, STRUCTURE_KEYWORDS};
use crate::types::SegmentLabel;

// Allow unwrap for compile-time constant regex patterns in lazy_static blocks
#[allow(clippy::unwrap_used)]
mod patterns {
    use super::{lazy_static, Regex};

    lazy_static! {
        /// Any `[...]` on a single line.
        pub static ref ANY_ANNOTATION: Regex = Regex::new(r"\[.*\]").unwrap();
        /// A bracket pair without a nested closing bracket, for full removal.
        pub static ref BRACKET_PAIR: Regex = Regex::new(r"\[[^\]]*\]").unwrap();
    }
}

/// A bracketed marker found in a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationToken {
    content: String,
    start: usize,
    end: usize,
}

impl AnnotationToken {
    /// Find the annotation on a line: first `[` through last `]`.
    pub fn find(line: &str) -> Option<Self> {
        let start = line.find('[')?;
        let close = line.rfind(']')?;
        if close < start {
            return None;
        }
        Some(Self {
            content: line[start + 1..close].to_lowercase(),
            start,
            end: close + 1,
        })
    }

    /// Byte range of the annotation, brackets included.
    pub const fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// The first structure keyword found, in priority order.
    pub fn structure_keyword(&self) -> Option<&'static str> {
        STRUCTURE_KEYWORDS
            .iter()
            .copied()
            .find(|kw| self.content.contains(kw))
    }

    /// Whether this annotation marks song structure.
    pub fn is_structure(&self) -> bool {
        self.structure_keyword().is_some()
    }

    /// Whether this annotation is a performance cue.
    pub fn is_instrument(&self) -> bool {
        INSTRUMENT_KEYWORDS.iter().any(|kw| self.content.contains(kw))
    }

    /// Label for this annotation; `Unknown` when no structure keyword matches.
    pub fn label(&self) -> SegmentLabel {
        self.structure_keyword()
            .map_or(SegmentLabel::Unknown, SegmentLabel::from_keyword)
    }
}

/// Classify a line as a structure annotation, returning the segment label it opens.
pub fn classify_line(line: &str) -> Option<SegmentLabel> {
    AnnotationToken::find(line)
        .filter(AnnotationToken::is_structure)
        .map(|token| token.label())
}

/// Fast check: does the text contain any `[...]` on one line?
pub fn contains_annotations(text: &str) -> bool {
    patterns::ANY_ANNOTATION.is_match(text)
}

/// Every `[...]` pair in the text, verbatim and in order.
pub fn bracket_annotations(text: &str) -> impl Iterator<Item = &str> {
    patterns::BRACKET_PAIR.find_iter(text).map(|m| m.as_str())
}

/// Whether the text opens with a `[...]` pair.
pub fn starts_with_annotation(text: &str) -> bool {
    patterns::BRACKET_PAIR.find(text).is_some_and(|m| m.start() == 0)
}

/// Remove instrument annotations such as `[Guitar Solo]` from every line.
pub fn strip_instrument_annotations(text: &str) -> String {
    strip_matching(text, AnnotationToken::is_instrument)
}

/// Remove structure annotations such as `[Chorus]` from every line.
pub fn strip_structure_annotations(text: &str) -> String {
    strip_matching(text, AnnotationToken::is_structure)
}

/// Remove every `[...]` pair from the text.
pub fn strip_all_annotations(text: &str) -> String {
    patterns::BRACKET_PAIR.replace_all(text, "").into_owned()
}

fn strip_matching(text: &str, predicate: impl Fn(&AnnotationToken) -> bool) -> String {
    text.split('\n')
        .map(|line| match AnnotationToken::find(line) {
            Some(token) if predicate(&token) => {
                let span = token.span();
                format!("{}{}", &line[..span.start], &line[span.end..])
            }
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn classifies_by_keyword_priority() {
        assert_eq!(classify_line("[Verse 1]"), Some(SegmentLabel::Verse));
        assert_eq!(classify_line("[CHORUS]"), Some(SegmentLabel::Chorus));
        assert_eq!(classify_line("[Refrain]"), Some(SegmentLabel::Chorus));
        assert_eq!(classify_line("[Pre-Chorus]"), Some(SegmentLabel::Chorus));
        assert_eq!(classify_line("[Verse / Chorus]"), Some(SegmentLabel::Verse));
        assert_eq!(classify_line("[Bridge: Drop it]"), Some(SegmentLabel::Bridge));
        assert_eq!(classify_line("[Interlude]"), Some(SegmentLabel::Interlude));
    }

    #[test]
    fn non_structure_lines_are_not_classified() {
        assert_eq!(classify_line("just words"), None);
        assert_eq!(classify_line("[x2]"), None);
        assert_eq!(classify_line("] verse ["), None);
    }

    #[test]
    fn unmatched_content_labels_unknown() {
        let token = AnnotationToken::find("[Coda]").unwrap();
        assert!(!token.is_structure());
        assert_eq!(token.label(), SegmentLabel::Unknown);
    }

    #[test]
    fn instrument_annotations_are_stripped() {
        let text = "[Guitar Solo]\nkeep me\n[spoken: whisper]\n[Verse]";
        assert_eq!(strip_instrument_annotations(text), "\nkeep me\n\n[Verse]");
    }

    #[test]
    fn structure_strip_spans_first_to_last_bracket() {
        assert_eq!(strip_structure_annotations("a [x2] [Chorus] b"), "a  b");
        assert_eq!(strip_structure_annotations("a [x2] b"), "a [x2] b");
    }

    #[test]
    fn bracket_pairs_are_listed_verbatim() {
        let found: Vec<&str> = bracket_annotations("[Intro]\nla [x2]\n[Verse 1] go").collect();
        assert_eq!(found, vec!["[Intro]", "[x2]", "[Verse 1]"]);
        assert!(starts_with_annotation("[Intro]\nla"));
        assert!(!starts_with_annotation("la\n[Intro]"));
    }

    #[test]
    fn strip_all_removes_every_pair() {
        assert_eq!(strip_all_annotations("a [x2] b [?] c"), "a  b  c");
    }

    #[test]
    fn detects_any_annotation_on_one_line() {
        assert!(contains_annotations("hey\n[Intro]\nyou"));
        assert!(!contains_annotations("no brackets here"));
        assert!(!contains_annotations("open [\nclose ]"));
    }
}
