//! Parallel feature extraction over a batch of songs.
//!
//! Songs are independent, so the batch fans out over rayon workers. Each
//! worker owns one [`FeatureExtractor`] and with it its own memos, which keeps
//! the hot path free of locks. Results keep the input order.

use rayon::prelude::*;
use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::phonetics::PhoneticLookup;
use crate::services::features::FeatureExtractor;
use crate::types::{FeatureMap, Song, SongId};

/// Features of one successfully analyzed song.
#[derive(Debug, Clone, Serialize)]
pub struct SongFeatures {
    /// The song's identifier.
    pub id: SongId,
    /// Every feature, flattened next to the id when serialized.
    #[serde(flatten)]
    pub features: FeatureMap,
}

/// A song whose feature set was discarded.
#[derive(Debug, Clone, Serialize)]
pub struct FailedSong {
    /// The song's identifier.
    pub id: SongId,
    /// Why extraction failed.
    pub error: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Songs with a complete feature map, in input order.
    pub succeeded: Vec<SongFeatures>,
    /// Songs excluded from the output, in input order.
    pub failed: Vec<FailedSong>,
}

impl BatchReport {
    /// Total number of songs processed.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Extract features for every song in parallel.
///
/// Only a thread pool that cannot be built fails the batch; individual song
/// failures are logged and reported in [`BatchReport::failed`].
pub fn extract_batch<L>(songs: &[Song], lookup: &L, config: &Config) -> Result<BatchReport>
where
    L: PhoneticLookup + Sync + ?Sized,
{
    let run = || {
        songs
            .par_iter()
            .map_init(
                || FeatureExtractor::new(lookup, config),
                |extractor, song| (song.id.clone(), extractor.extract(song)),
            )
            .collect::<Vec<_>>()
    };

    let results = match config.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| {
                Error::config(
                    format!("cannot start {threads} worker threads: {e}"),
                    "Lower LYRICSCOPE_THREADS or unset it",
                )
            })?
            .install(run),
        None => run(),
    };

    let mut report = BatchReport::default();
    for (id, result) in results {
        match result {
            Ok(features) => report.succeeded.push(SongFeatures { id, features }),
            Err(e) => {
                tracing::warn!("Skipping song {id}: {e}");
                report.failed.push(FailedSong { id, error: e.to_string() });
            }
        }
    }

    tracing::info!(
        "Extracted features for {} of {} songs",
        report.succeeded.len(),
        report.total()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::phonetics::PronunciationDictionary;

    fn song(id: &str, lyrics: &str) -> Song {
        Song {
            id: SongId::new(id),
            title: id.to_string(),
            lyrics: lyrics.to_string(),
        }
    }

    #[test]
    fn failures_are_excluded_and_order_is_kept() {
        let dict = PronunciationDictionary::from_entries([("cat", "K AE1 T"), ("hat", "HH AE1 T")]);
        let songs = vec![
            song("one", "the cat sat\non the hat"),
            song("two", "short"),
            song("three", "[Chorus]\nin the hat\n[Verse]\nthe cat"),
        ];

        let report = extract_batch(&songs, &dict, &Config::default()).unwrap();
        assert_eq!(report.total(), 3);
        let ids: Vec<&str> = report.succeeded.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["one", "three"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].id.as_str(), "two");
    }

    #[test]
    fn fixed_thread_count_is_honored() {
        let dict = PronunciationDictionary::default();
        let mut config = Config::default();
        config.threads = Some(2);
        let songs: Vec<Song> = (0..8).map(|i| song(&i.to_string(), "la la la")).collect();

        let report = extract_batch(&songs, &dict, &config).unwrap();
        assert_eq!(report.succeeded.len(), 8);
    }

    #[test]
    fn features_serialize_flat() {
        let dict = PronunciationDictionary::default();
        let report = extract_batch(&[song("s", "no markers at all")], &dict, &Config::default()).unwrap();
        let json = serde_json::to_value(&report.succeeded[0]).unwrap();
        assert_eq!(json["id"], "s");
        assert_eq!(json["number_of_verses"], -1);
        assert_eq!(json["starts_with_chorus"], -1);
    }
}
