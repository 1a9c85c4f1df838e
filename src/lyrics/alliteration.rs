//! Alliteration runs within a line.

use std::collections::BTreeSet;

use serde::Serialize;

/// Alliteration runs tallied by length.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlliterationCounts {
    /// Runs of exactly two tokens.
    pub len_2: usize,
    /// Runs of exactly three tokens.
    pub len_3: usize,
    /// Runs of four or more tokens.
    pub len_4_plus: usize,
}

impl AlliterationCounts {
    /// Tally one run; runs shorter than two are ignored.
    pub fn record(&mut self, run: usize) {
        match run {
            0 | 1 => {}
            2 => self.len_2 += 1,
            3 => self.len_3 += 1,
            _ => self.len_4_plus += 1,
        }
    }

    /// Tally every line, given a way to look up a token's initial phones.
    pub fn from_lines<F>(lines: &[Vec<String>], mut initial_phones: F) -> Self
    where
        F: FnMut(&str) -> BTreeSet<String>,
    {
        let mut counts = Self::default();
        for tokens in lines {
            let initials: Vec<BTreeSet<String>> =
                tokens.iter().map(|t| initial_phones(t.as_str())).collect();
            for run in runs(&initials) {
                counts.record(run);
            }
        }
        counts
    }
}

/// Lengths of the alliteration runs (length >= 2) in one line.
///
/// A run grows while each token shares an initial phone with the token right
/// before it, so the shared sound may drift along the run. Scanning resumes
/// after the run; tokens with no initial phones never start or extend a run.
pub fn runs(initials: &[BTreeSet<String>]) -> Vec<usize> {
    let mut found = Vec::new();
    let mut i = 0;

    while i < initials.len() {
        let mut len = 1;
        while i + len < initials.len()
            && !initials[i + len - 1].is_disjoint(&initials[i + len])
        {
            len += 1;
        }

        if len > 1 {
            found.push(len);
        }
        i += len;
    }

    found
}
