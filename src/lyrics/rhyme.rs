//! Rhyme scheme detection over line-final words.
//!
//! Couplets compare each adjacent line pair. Clerihew (AABB), alternating
//! (ABAB) and nested (ABBA) schemes are tested independently on every window
//! of four consecutive lines, so one window may count for several schemes.
//! Every firing adds its lines and final words to shared tally sets.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::lyrics::alliteration::AlliterationCounts;

/// Rhyme and alliteration statistics of one lyric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RhymeFeatures {
    /// Adjacent line pairs whose final words rhyme.
    pub num_couplets: usize,
    /// Four-line windows rhyming AABB.
    pub num_clerihews: usize,
    /// Four-line windows rhyming ABAB.
    pub num_alternating: usize,
    /// Four-line windows rhyming ABBA.
    pub num_nested: usize,
    /// Alliteration runs by length.
    pub alliterations: AlliterationCounts,
    /// Share of lines taking part in any detected rhyme.
    pub rhyme_percent: f64,
    /// Distinct final words taking part in any detected rhyme.
    pub unique_rhyme_words: usize,
}

impl RhymeFeatures {
    /// Compute every statistic over tokenized lines.
    ///
    /// `rhymes(a, b)` decides whether `a` rhymes with `b`; `initial_phones`
    /// feeds the alliteration scan. Fails with [`Error::EmptyLyrics`] when no
    /// line is left to measure.
    pub fn compute<R, I>(lines: &[Vec<String>], rhymes: R, initial_phones: I) -> Result<Self>
    where
        R: FnMut(&str, &str) -> bool,
        I: FnMut(&str) -> BTreeSet<String>,
    {
        let finals: Vec<&str> = lines
            .iter()
            .filter_map(|tokens| tokens.last().map(String::as_str))
            .collect();
        if finals.is_empty() || finals.len() != lines.len() {
            return Err(Error::EmptyLyrics);
        }

        let tally = RhymeTally::scan(&finals, rhymes);
        let alliterations = AlliterationCounts::from_lines(lines, initial_phones);

        Ok(Self {
            num_couplets: tally.couplets,
            num_clerihews: tally.clerihews,
            num_alternating: tally.alternating,
            num_nested: tally.nested,
            alliterations,
            rhyme_percent: tally.lines.len() as f64 / finals.len() as f64,
            unique_rhyme_words: tally.words.len(),
        })
    }
}

/// Pattern counts plus the deduplicated line and word tallies.
#[derive(Debug, Default)]
struct RhymeTally<'a> {
    couplets: usize,
    clerihews: usize,
    alternating: usize,
    nested: usize,
    lines: BTreeSet<usize>,
    words: BTreeSet<&'a str>,
}

impl<'a> RhymeTally<'a> {
    fn scan<R>(finals: &[&'a str], mut rhymes: R) -> Self
    where
        R: FnMut(&str, &str) -> bool,
    {
        let mut tally = Self::default();

        for (i, pair) in finals.windows(2).enumerate() {
            if rhymes(pair[1], pair[0]) {
                tally.couplets += 1;
                tally.mark(i, pair);
            }
        }

        for (i, w) in finals.windows(4).enumerate() {
            if rhymes(w[1], w[0]) && rhymes(w[3], w[2]) {
                tally.clerihews += 1;
                tally.mark(i, w);
            }
            if rhymes(w[2], w[0]) && rhymes(w[3], w[1]) {
                tally.alternating += 1;
                tally.mark(i, w);
            }
            if rhymes(w[3], w[0]) && rhymes(w[2], w[1]) {
                tally.nested += 1;
                tally.mark(i, w);
            }
        }

        tally
    }

    fn mark(&mut self, start: usize, window: &[&'a str]) {
        for (offset, &word) in window.iter().enumerate() {
            self.lines.insert(start + offset);
            self.words.insert(word);
        }
    }
}
