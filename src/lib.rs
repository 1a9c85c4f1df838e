//! `Lyricscope` - song lyric normalization, segmentation and feature extraction.
//!
//! This crate turns raw lyric text into structural features (verse/chorus
//! patterns) and phonetic features (rhyme schemes, alliteration runs), one
//! song at a time or over a parallel batch.

// Re-export public modules for use in integration tests and as a library
pub mod config;
pub mod constants;
pub mod error;
pub mod lyrics;
pub mod phonetics;
pub mod services;
pub mod types;
pub mod utils;
