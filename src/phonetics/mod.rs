//! Phonetic comparison of words.
//!
//! Pronunciations are ARPABET phone sequences (`K AE1 T`). Vowels carry a
//! stress digit; the rhyming part of a pronunciation starts at its last
//! stressed vowel.

pub mod dictionary;

pub use dictionary::PronunciationDictionary;

use std::collections::BTreeSet;

/// One pronunciation variant: an ordered sequence of ARPABET phones.
pub type Pronunciation = Vec<String>;

/// Trait for pronunciation lookup providers.
///
/// Lookups are case-insensitive. Unknown words have no pronunciations and
/// therefore never rhyme or alliterate with anything.
pub trait PhoneticLookup {
    /// All pronunciation variants of a word (empty when unknown).
    fn pronunciations(&self, word: &str) -> &[Pronunciation];

    /// The set of first phones over all pronunciation variants.
    fn initial_phones(&self, word: &str) -> BTreeSet<String> {
        self.pronunciations(word)
            .iter()
            .filter_map(|p| p.first().cloned())
            .collect()
    }

    /// Whether `candidate` belongs to the rhyme set of `word`.
    ///
    /// The rhyme set of a word holds every other word with a pronunciation
    /// ending in the rhyming part of one of the word's pronunciations. Rhyme
    /// sets hold lower-case dictionary words, so a candidate with any
    /// upper-case letter is never a member; `word` itself is looked up
    /// case-insensitively and only its exact spelling is excluded.
    fn rhymes_with(&self, candidate: &str, word: &str) -> bool {
        if candidate == word || candidate != candidate.to_lowercase() {
            return false;
        }

        let candidates = self.pronunciations(candidate);
        self.pronunciations(word).iter().any(|target| {
            let tail = rhyming_part(target);
            candidates.iter().any(|p| p.ends_with(tail))
        })
    }
}

/// The phones from the last stressed vowel to the end.
///
/// Falls back to the whole pronunciation when no vowel past the first phone
/// carries primary or secondary stress.
pub fn rhyming_part(pronunciation: &[String]) -> &[String] {
    (1..pronunciation.len())
        .rev()
        .find(|&i| pronunciation[i].ends_with(['1', '2']))
        .map_or(pronunciation, |i| &pronunciation[i..])
}

/// Rhyme test used by the pattern detectors: identical tokens rhyme, otherwise
/// `a` must be in the rhyme set of `b`.
pub fn do_rhyme<L: PhoneticLookup + ?Sized>(lookup: &L, a: &str, b: &str) -> bool {
    a == b || lookup.rhymes_with(a, b)
}
