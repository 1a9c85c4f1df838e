//! Shared utilities: bounded memoization and lyric file loading.

pub mod cache;
pub mod lyric_files;

pub use cache::LruCache;
