//! Word tokenization for line-level rhyme and alliteration analysis.

use std::sync::LazyLock;

use regex::Regex;

/// Words (letters/digits with inner apostrophes or hyphens), or any other
/// single non-space character.
#[allow(clippy::expect_used)]
static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’\-][\p{L}\p{N}]+)*|\S").expect("valid regex: RE_TOKEN")
});

/// Trait for tokenizers that turn a line into an ordered token list.
pub trait Tokenizer: Send + Sync {
    /// Split a line into tokens, punctuation included.
    fn tokenize(&self, line: &str) -> Vec<String>;

    /// Get the name of this tokenizer (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// Default regex-based word tokenizer.
#[derive(Debug, Default, Clone, Copy)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, line: &str) -> Vec<String> {
        RE_TOKEN
            .find_iter(line)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    fn name(&self) -> &'static str {
        "WordTokenizer"
    }
}

/// Whether a token consists only of punctuation.
pub fn is_punctuation(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_punctuation() || matches!(c, '‘' | '’' | '“' | '”' | '…' | '–' | '—' | '¿' | '¡'))
}

/// Tokens of one line with punctuation tokens removed.
pub fn line_tokens(tokenizer: &dyn Tokenizer, line: &str) -> Vec<String> {
    tokenizer
        .tokenize(line)
        .into_iter()
        .filter(|t| !is_punctuation(t))
        .collect()
}

/// Word tokens for every non-blank line of the text. Lines left without a
/// word token are discarded.
pub fn text_line_tokens(tokenizer: &dyn Tokenizer, text: &str) -> Vec<Vec<String>> {
    text.split('\n')
        .filter(|l| !l.trim().is_empty())
        .map(|l| line_tokens(tokenizer, l))
        .filter(|tokens| !tokens.is_empty())
        .collect()
}
