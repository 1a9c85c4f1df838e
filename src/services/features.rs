//! Per-song feature extraction.
//!
//! A [`FeatureExtractor`] belongs to one worker. It borrows the shared
//! pronunciation table and keeps bounded memos of line tokens, initial
//! phones and rhyme tests, so repeated lines and words across a batch are
//! only analyzed once per worker.

use std::collections::BTreeSet;

use crate::config::Config;
use crate::constants::features::MIN_SPACES;
use crate::error::{Error, Result};
use crate::lyrics::rhyme::RhymeFeatures;
use crate::lyrics::sanitize::sanitize;
use crate::lyrics::structure::{title_occurrences, StructureAnalysis};
use crate::lyrics::tokenize::{line_tokens, Tokenizer, WordTokenizer};
use crate::phonetics::{do_rhyme, PhoneticLookup};
use crate::types::{FeatureMap, FeatureValue, Song};
use crate::utils::cache::LruCache;

/// Extracts the full feature map of one song at a time.
pub struct FeatureExtractor<'d, L: PhoneticLookup + ?Sized> {
    lookup: &'d L,
    tokenizer: Box<dyn Tokenizer>,
    strip_all: bool,
    tokens: LruCache<String, Vec<String>>,
    initials: LruCache<String, BTreeSet<String>>,
    rhymes: LruCache<(String, String), bool>,
}

impl<'d, L: PhoneticLookup + ?Sized> FeatureExtractor<'d, L> {
    /// Create an extractor over a pronunciation table, sized by the config.
    pub fn new(lookup: &'d L, config: &Config) -> Self {
        Self {
            lookup,
            tokenizer: Box::new(WordTokenizer),
            strip_all: config.strip_all_annotations,
            tokens: LruCache::new(config.cache_capacity),
            initials: LruCache::new(config.cache_capacity),
            rhymes: LruCache::new(config.cache_capacity),
        }
    }

    /// Replace the default word tokenizer.
    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        tracing::debug!("Using tokenizer {}", tokenizer.name());
        self.tokenizer = tokenizer;
        self.tokens.clear();
        self
    }

    /// Compute every feature of a song.
    ///
    /// Either the whole map is returned or an error; a failing song never
    /// yields a partial map.
    pub fn extract(&mut self, song: &Song) -> Result<FeatureMap> {
        let sanitized = sanitize(&song.lyrics, self.strip_all);
        let spaces = sanitized.matches(' ').count();
        if spaces < MIN_SPACES {
            return Err(Error::InsufficientLyrics { spaces });
        }

        let structure = StructureAnalysis::from_raw(&song.lyrics);
        let lines = self.line_tokens(&sanitized);
        let rhyme = self.rhyme_features(&lines)?;

        let mut features = FeatureMap::new();
        features.insert("title_occurrences", title_occurrences(&song.lyrics, &song.title).into());
        features.insert("number_of_sections", structure.number_of_sections());
        features.insert("number_of_verses", structure.number_of_verses());
        features.insert("number_of_choruses", structure.number_of_choruses());
        features.insert("starts_with_chorus", structure.starts_with_chorus());
        features.insert("relation_verses_sections", structure.verse_share());
        features.insert("relation_chorus_sections", structure.chorus_share());
        features.insert(
            "ends_with_two_chorus_repetitions",
            structure.ends_with_two_chorus_repetitions(),
        );
        features.insert("pattern_verse_chorus_alternating", structure.alternating_verse_chorus());
        features.insert(
            "pattern_two_verses_at_least_one_chorus",
            structure.two_verses_at_least_one_chorus_between(),
        );
        features.insert(
            "pattern_two_choruses_at_least_one_verse",
            structure.two_choruses_at_least_one_verse_between(),
        );
        features.insert("num_couplets", rhyme.num_couplets.into());
        features.insert("num_clerihews", rhyme.num_clerihews.into());
        features.insert("num_alternating", rhyme.num_alternating.into());
        features.insert("num_nested", rhyme.num_nested.into());
        features.insert("alliterations_len_2", rhyme.alliterations.len_2.into());
        features.insert("alliterations_len_3", rhyme.alliterations.len_3.into());
        features.insert("alliterations_len_4_plus", rhyme.alliterations.len_4_plus.into());
        features.insert("rhyme_percent", FeatureValue::Ratio(rhyme.rhyme_percent));
        features.insert("unique_rhyme_words", rhyme.unique_rhyme_words.into());

        Ok(features)
    }

    /// Memo `(hits, misses)` for tokens, initial phones and rhyme tests.
    pub const fn cache_stats(&self) -> [(u64, u64); 3] {
        [self.tokens.stats(), self.initials.stats(), self.rhymes.stats()]
    }

    /// Word tokens of every non-blank line; lines without words are dropped.
    fn line_tokens(&mut self, text: &str) -> Vec<Vec<String>> {
        let tokenizer = self.tokenizer.as_ref();
        text.split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                self.tokens
                    .get_or_insert_with(line.to_string(), || line_tokens(tokenizer, line))
            })
            .filter(|tokens| !tokens.is_empty())
            .collect()
    }

    fn rhyme_features(&mut self, lines: &[Vec<String>]) -> Result<RhymeFeatures> {
        let lookup = self.lookup;
        let rhymes = &mut self.rhymes;
        let initials = &mut self.initials;

        RhymeFeatures::compute(
            lines,
            |a, b| {
                rhymes.get_or_insert_with((a.to_string(), b.to_string()), || {
                    do_rhyme(lookup, a, b)
                })
            },
            |word| {
                initials.get_or_insert_with(word.to_string(), || lookup.initial_phones(word))
            },
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::phonetics::PronunciationDictionary;
    use crate::types::SongId;

    fn dict() -> PronunciationDictionary {
        PronunciationDictionary::from_entries([
            ("cat", "K AE1 T"),
            ("hat", "HH AE1 T"),
            ("sat", "S AE1 T"),
            ("silly", "S IH1 L IY0"),
            ("snake", "S N EY1 K"),
            ("the", "DH AH0"),
        ])
    }

    fn song(title: &str, lyrics: &str) -> Song {
        Song {
            id: SongId::new("test"),
            title: title.to_string(),
            lyrics: lyrics.to_string(),
        }
    }

    #[test]
    fn extracts_every_feature() {
        let dict = dict();
        let mut extractor = FeatureExtractor::new(&dict, &Config::default());
        let lyrics = "[Verse]\nsilly snake sat on the cat\n[Chorus]\nwear the hat\n[Verse]\nthe cat\n[Chorus]\nwear the hat";
        let features = extractor.extract(&song("The Hat", lyrics)).unwrap();

        assert_eq!(features.len(), 20);
        assert_eq!(features["title_occurrences"], FeatureValue::Count(2));
        assert_eq!(features["number_of_sections"], FeatureValue::Count(4));
        assert_eq!(features["pattern_verse_chorus_alternating"], FeatureValue::Flag(true));
        assert_eq!(features["num_couplets"], FeatureValue::Count(3));
        assert_eq!(features["alliterations_len_3"], FeatureValue::Count(1));
        assert_eq!(features["unique_rhyme_words"], FeatureValue::Count(2));
        assert_eq!(features["rhyme_percent"], FeatureValue::Ratio(1.0));
    }

    #[test]
    fn unannotated_song_has_undefined_structure() {
        let dict = dict();
        let mut extractor = FeatureExtractor::new(&dict, &Config::default());
        let features = extractor
            .extract(&song("Cat", "a cat in a hat\nthe cat sat"))
            .unwrap();

        assert!(features["number_of_verses"].is_undefined());
        assert!(features["pattern_two_choruses_at_least_one_verse"].is_undefined());
        assert_eq!(features["title_occurrences"], FeatureValue::Count(2));
        assert_eq!(features["num_couplets"], FeatureValue::Count(1));
    }

    #[test]
    fn too_few_spaces_fails_the_song() {
        let dict = dict();
        let mut extractor = FeatureExtractor::new(&dict, &Config::default());
        let err = extractor.extract(&song("x", "[Verse]\nhello world")).unwrap_err();
        assert!(matches!(err, Error::InsufficientLyrics { spaces: 1 }));
    }

    #[test]
    fn punctuation_only_lyrics_fail_atomically() {
        let dict = dict();
        let mut extractor = FeatureExtractor::new(&dict, &Config::default());
        let err = extractor.extract(&song("x", "! ? !\n. , .")).unwrap_err();
        assert!(matches!(err, Error::EmptyLyrics));
    }

    #[test]
    fn repeated_lines_hit_the_memo() {
        let dict = dict();
        let mut extractor = FeatureExtractor::new(&dict, &Config::default());
        extractor
            .extract(&song("x", "the cat sat\nthe cat sat\nthe cat sat"))
            .unwrap();

        let [(token_hits, token_misses), _, _] = extractor.cache_stats();
        assert_eq!(token_misses, 1);
        assert_eq!(token_hits, 2);
    }

    struct WhitespaceTokenizer;

    impl Tokenizer for WhitespaceTokenizer {
        fn tokenize(&self, line: &str) -> Vec<String> {
            line.split_whitespace().map(String::from).collect()
        }

        fn name(&self) -> &'static str {
            "WhitespaceTokenizer"
        }
    }

    #[test]
    fn custom_tokenizer_keeps_trailing_punctuation() {
        let dict = dict();
        let mut extractor = FeatureExtractor::new(&dict, &Config::default())
            .with_tokenizer(Box::new(WhitespaceTokenizer));
        let features = extractor.extract(&song("x", "a fat cat,\nin the hat,")).unwrap();
        assert_eq!(features["num_couplets"], FeatureValue::Count(0));
    }
}
