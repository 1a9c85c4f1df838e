//! Core type definitions shared across the lyric pipeline.
//!
//! Segment labels, segments, song records and feature values live here so the
//! pipeline stages and the batch driver agree on one vocabulary.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::constants::features::UNDEFINED_SENTINEL;

/// Structural label assigned to a block of lyric lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SegmentLabel {
    /// A verse.
    Verse,
    /// A chorus (also used for refrains).
    Chorus,
    /// An intro.
    Intro,
    /// An outro.
    Outro,
    /// A bridge.
    Bridge,
    /// A hook.
    Hook,
    /// An interlude.
    Interlude,
    /// A drop.
    Drop,
    /// Lines before any structural annotation, or an unrecognized section.
    #[default]
    Unknown,
}

impl SegmentLabel {
    /// Returns all label variants in classification priority order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Verse,
            Self::Chorus,
            Self::Intro,
            Self::Outro,
            Self::Bridge,
            Self::Hook,
            Self::Interlude,
            Self::Drop,
            Self::Unknown,
        ]
    }

    /// Returns the human-readable name of this label.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Verse => "Verse",
            Self::Chorus => "Chorus",
            Self::Intro => "Intro",
            Self::Outro => "Outro",
            Self::Bridge => "Bridge",
            Self::Hook => "Hook",
            Self::Interlude => "Interlude",
            Self::Drop => "Drop",
            Self::Unknown => "Unknown",
        }
    }

    /// Map a lower-case structure keyword to its label.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "verse" => Self::Verse,
            "chorus" | "refrain" => Self::Chorus,
            "intro" => Self::Intro,
            "outro" => Self::Outro,
            "bridge" => Self::Bridge,
            "hook" => Self::Hook,
            "interlude" => Self::Interlude,
            "drop" => Self::Drop,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for SegmentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A labeled block of lyric lines, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Label fixed when the segment was opened.
    pub label: SegmentLabel,
    /// Content lines, without leading or trailing blank lines.
    pub lines: Vec<String>,
}

impl Segment {
    /// Content joined with newlines.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }
}

/// Identifier of a song within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SongId(pub String);

impl SongId {
    /// Create a new `SongId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SongId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SongId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One song as handed to the feature extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    /// Batch-unique identifier.
    pub id: SongId,
    /// Track title, used for title-occurrence counting.
    pub title: String,
    /// Raw lyric text, annotations included.
    pub lyrics: String,
}

/// A single feature value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    /// An integer count.
    Count(i64),
    /// A fraction or ratio.
    Ratio(f64),
    /// A boolean predicate.
    Flag(bool),
    /// Structural feature undefined because the lyric has no annotations.
    Undefined,
}

impl FeatureValue {
    /// Whether this value is the undefined sentinel.
    pub const fn is_undefined(self) -> bool {
        matches!(self, Self::Undefined)
    }
}

impl From<usize> for FeatureValue {
    fn from(n: usize) -> Self {
        Self::Count(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<bool> for FeatureValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl From<f64> for FeatureValue {
    fn from(r: f64) -> Self {
        Self::Ratio(r)
    }
}

impl Serialize for FeatureValue {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Count(n) => s.serialize_i64(n),
            Self::Ratio(r) => s.serialize_f64(r),
            Self::Flag(b) => s.serialize_bool(b),
            Self::Undefined => s.serialize_i64(UNDEFINED_SENTINEL),
        }
    }
}

/// Feature name to value, ordered by name for stable output.
pub type FeatureMap = BTreeMap<&'static str, FeatureValue>;
