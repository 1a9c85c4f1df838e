//! CMU-format pronunciation dictionary.
//!
//! Reads files in the CMU Pronouncing Dictionary layout, one variant per line:
//! `WORD  PH1 PH2 ...`, with further variants spelled `WORD(2)`. Lines starting
//! with `;;;` are comments. The table is loaded once and then only read.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::phonetics::{rhyming_part, PhoneticLookup, Pronunciation};

/// Preloaded word to pronunciation-variants table.
#[derive(Debug, Default, Clone)]
pub struct PronunciationDictionary {
    entries: HashMap<String, Vec<Pronunciation>>,
}

impl PronunciationDictionary {
    /// Build a dictionary from `(word, "PH1 PH2 ...")` pairs.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut dict = Self::default();
        for (word, phones) in entries {
            dict.insert(word, phones.split_whitespace().map(String::from).collect());
        }
        dict
    }

    /// Parse dictionary text, returning the table and the number of skipped lines.
    pub fn parse(text: &str) -> (Self, usize) {
        let mut dict = Self::default();
        let mut skipped = 0;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }

            let Some((word_raw, phones)) = line.split_once(char::is_whitespace) else {
                skipped += 1;
                continue;
            };

            // Strip variant marker: WORD(2) -> WORD
            let word = word_raw.split('(').next().unwrap_or(word_raw);
            let phones: Pronunciation = phones.split_whitespace().map(String::from).collect();

            if word.is_empty() || phones.is_empty() {
                skipped += 1;
                continue;
            }

            dict.insert(word, phones);
        }

        (dict, skipped)
    }

    /// Load a dictionary file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let start = Instant::now();
        let text = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;

        let (dict, skipped) = Self::parse(&text);
        if dict.is_empty() {
            return Err(Error::Dictionary(format!(
                "no pronunciations found in {}",
                path.display()
            )));
        }

        if skipped > 0 {
            tracing::warn!("Skipped {skipped} malformed lines in {}", path.display());
        }
        tracing::info!(
            "Loaded {} words from {} in {:?}",
            dict.len(),
            path.display(),
            start.elapsed()
        );

        Ok(dict)
    }

    /// Add a pronunciation variant for a word.
    pub fn insert(&mut self, word: &str, pronunciation: Pronunciation) {
        let variants = self.entries.entry(word.to_lowercase()).or_default();
        if !variants.contains(&pronunciation) {
            variants.push(pronunciation);
        }
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary holds no words.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every word rhyming with `word`, sorted. Only the exact spelling of
    /// `word` is left out.
    ///
    /// Full table scan; the feature pipeline uses
    /// [`PhoneticLookup::rhymes_with`] for pairwise tests instead.
    pub fn rhyme_set(&self, word: &str) -> Vec<String> {
        let key = word.to_lowercase();
        let tails: Vec<&[String]> = self
            .pronunciations(&key)
            .iter()
            .map(|p| rhyming_part(p))
            .collect();

        if tails.is_empty() {
            return Vec::new();
        }

        let mut rhymes: Vec<String> = self
            .entries
            .iter()
            .filter(|(other, _)| other.as_str() != word)
            .filter(|(_, variants)| {
                variants
                    .iter()
                    .any(|p| tails.iter().any(|tail| p.ends_with(tail)))
            })
            .map(|(other, _)| other.clone())
            .collect();

        rhymes.sort();
        rhymes
    }
}

impl PhoneticLookup for PronunciationDictionary {
    fn pronunciations(&self, word: &str) -> &[Pronunciation] {
        self.entries
            .get(&word.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
