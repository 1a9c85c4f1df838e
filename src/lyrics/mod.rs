//! Lyric processing pipeline.
//!
//! Raw lyric text flows through these stages:
//! - [`normalize`](mod@normalize): whitespace canonicalization and repeat-marker expansion
//! - [`annotations`]: `[...]` marker classification and stripping
//! - [`segment`](mod@segment): labeled segments from structure annotations
//! - [`sanitize`](mod@sanitize): the annotation-free lyric measured by the rhyme engine
//! - [`structure`]: label-sequence features
//! - [`tokenize`], [`rhyme`], [`alliteration`]: line-level phonetic statistics

pub mod alliteration;
pub mod annotations;
pub mod normalize;
pub mod rhyme;
pub mod sanitize;
pub mod segment;
pub mod structure;
pub mod tokenize;

pub use alliteration::AlliterationCounts;
pub use annotations::AnnotationToken;
pub use normalize::normalize;
pub use rhyme::RhymeFeatures;
pub use sanitize::{prepare_for_segmentation, sanitize};
pub use segment::{label_sequence, segment};
pub use structure::{title_occurrences, StructureAnalysis};
pub use tokenize::{Tokenizer, WordTokenizer};
