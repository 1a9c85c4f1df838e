//! `Lyricscope` - extract lyric features for a batch of songs.
//!
//! Usage:
//!   `lyricscope --jsonl <songs.jsonl>`
//!   `lyricscope <dir-or-file.txt>...`
//!
//! Prints one JSON object per analyzed song on stdout. Songs whose features
//! could not be computed are listed on stderr.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use lyricscope::config::Config;
use lyricscope::phonetics::PronunciationDictionary;
use lyricscope::services::extract_batch;
use lyricscope::utils::lyric_files::{discover_songs, read_jsonl};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        bail!("Usage: lyricscope --jsonl <songs.jsonl> | lyricscope <path>...");
    }

    let config = Config::load().context("Failed to load config")?;
    tracing::debug!("{} {}", config.app_name(), config.app_version());

    let songs = match args.iter().position(|a| a == "--jsonl") {
        Some(i) => {
            let path = args
                .get(i + 1)
                .map(PathBuf::from)
                .context("--jsonl needs a file argument")?;
            read_jsonl(&path).with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => {
            let roots: Vec<PathBuf> = args.iter().map(PathBuf::from).collect();
            discover_songs(&roots).context("Failed to read lyric files")?
        }
    };

    let dictionary_path = config.require_dictionary_path()?;
    let dictionary = PronunciationDictionary::load(dictionary_path)
        .with_context(|| format!("Failed to load dictionary {}", dictionary_path.display()))?;

    let report = extract_batch(&songs, &dictionary, &config)?;

    for song in &report.succeeded {
        println!("{}", serde_json::to_string(song)?);
    }

    if !report.failed.is_empty() {
        eprintln!("{} of {} songs failed:", report.failed.len(), report.total());
        for failed in &report.failed {
            eprintln!("  {}: {}", failed.id, failed.error);
        }
    }

    Ok(())
}
