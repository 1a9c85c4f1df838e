//! Annotation diagnostics over a song collection.
//!
//! Counts how many lyrics carry `[...]` decorations or annotation words at
//! all, which bracket texts are most common, and how the annotated lyrics
//! segment. Used to check a corpus before trusting its structural features.

use std::collections::HashMap;

use crate::constants::survey::ANNOTATION_WORDS;
use crate::lyrics::annotations::{bracket_annotations, contains_annotations, starts_with_annotation};
use crate::lyrics::sanitize::prepare_for_segmentation;
use crate::lyrics::segment::segment;
use crate::types::{SegmentLabel, Song};

/// Annotation statistics accumulated song by song.
#[derive(Debug, Default, Clone)]
pub struct AnnotationSurvey {
    songs: usize,
    decorated: usize,
    worded: usize,
    leading: usize,
    /// Bracket text -> (occurrences, first-seen order).
    annotations: HashMap<String, (usize, usize)>,
    segments: HashMap<SegmentLabel, usize>,
}

impl AnnotationSurvey {
    /// Survey every song.
    pub fn from_songs(songs: &[Song]) -> Self {
        let mut survey = Self::default();
        for song in songs {
            survey.record(song);
        }
        tracing::info!(
            "Surveyed {} songs: {} decorated, {} distinct annotations",
            survey.songs,
            survey.decorated,
            survey.annotations.len()
        );
        survey
    }

    /// Add one song to the tallies.
    pub fn record(&mut self, song: &Song) {
        let lyrics = song.lyrics.as_str();
        self.songs += 1;

        if contains_annotations(lyrics) {
            self.decorated += 1;
            for seg in segment(&prepare_for_segmentation(lyrics)) {
                *self.segments.entry(seg.label).or_default() += 1;
            }
        }

        let lower = lyrics.to_lowercase();
        if ANNOTATION_WORDS.iter().any(|w| lower.contains(w)) {
            self.worded += 1;
        }

        if starts_with_annotation(lyrics) {
            self.leading += 1;
        }

        for text in bracket_annotations(lyrics) {
            let next = self.annotations.len();
            self.annotations.entry(text.to_string()).or_insert((0, next)).0 += 1;
        }
    }

    /// Number of songs surveyed.
    pub const fn songs(&self) -> usize {
        self.songs
    }

    /// Songs with a `[...]` on some line.
    pub const fn decorated(&self) -> usize {
        self.decorated
    }

    /// Songs mentioning an annotation word anywhere, bracketed or not.
    pub const fn worded(&self) -> usize {
        self.worded
    }

    /// Songs whose lyric opens with a bracket pair.
    pub const fn leading(&self) -> usize {
        self.leading
    }

    /// Percentage of songs opening with a bracket pair; `None` for an empty survey.
    pub fn leading_percent(&self) -> Option<f64> {
        (self.songs > 0).then(|| 100.0 * self.leading as f64 / self.songs as f64)
    }

    /// The `limit` most common bracket texts, most frequent first. Ties keep
    /// the order in which the texts were first seen.
    pub fn most_common(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize, usize)> = self
            .annotations
            .iter()
            .map(|(text, &(count, order))| (text.as_str(), count, order))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        ranked
            .into_iter()
            .take(limit)
            .map(|(text, count, _)| (text, count))
            .collect()
    }

    /// Segment counts of the decorated songs for every label.
    pub fn segments_by_label(&self) -> Vec<(SegmentLabel, usize)> {
        SegmentLabel::all()
            .iter()
            .map(|&label| (label, self.segments.get(&label).copied().unwrap_or(0)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::SongId;

    fn song(lyrics: &str) -> Song {
        Song {
            id: SongId::new("s"),
            title: String::new(),
            lyrics: lyrics.to_string(),
        }
    }

    #[test]
    fn counts_decorations_words_and_leading_pairs() {
        let songs = [
            song("[Verse 1]\nhello\n[Chorus]\nla [x2]"),
            song("the chorus goes like this"),
            song("nothing to see\n[Chorus]\nhey"),
            song("plain"),
        ];
        let survey = AnnotationSurvey::from_songs(&songs);

        assert_eq!(survey.songs(), 4);
        assert_eq!(survey.decorated(), 2);
        assert_eq!(survey.worded(), 3);
        assert_eq!(survey.leading(), 1);
        assert_eq!(survey.leading_percent(), Some(25.0));
    }

    #[test]
    fn most_common_ranks_by_count_then_first_seen() {
        let songs = [
            song("[Intro]\n[Chorus]\na\n[Chorus]"),
            song("[Verse]\nb\n[Intro]\n[Chorus]"),
        ];
        let survey = AnnotationSurvey::from_songs(&songs);

        assert_eq!(
            survey.most_common(10),
            vec![("[Chorus]", 3), ("[Intro]", 2), ("[Verse]", 1)]
        );
        assert_eq!(survey.most_common(1), vec![("[Chorus]", 3)]);
    }

    #[test]
    fn segments_are_tallied_per_label() {
        let survey = AnnotationSurvey::from_songs(&[song("intro words\n[Verse]\na\n[Chorus]\nb\n[Verse]\nc")]);
        let by_label = survey.segments_by_label();

        assert_eq!(by_label.len(), SegmentLabel::all().len());
        assert!(by_label.contains(&(SegmentLabel::Verse, 2)));
        assert!(by_label.contains(&(SegmentLabel::Chorus, 1)));
        assert!(by_label.contains(&(SegmentLabel::Unknown, 1)));
        assert!(by_label.contains(&(SegmentLabel::Bridge, 0)));
    }

    #[test]
    fn empty_survey_has_no_percentage() {
        assert_eq!(AnnotationSurvey::default().leading_percent(), None);
    }
}
