//! Song loading for the batch driver.
//!
//! Songs come either from plain-text lyric files (one song per `.txt`,
//! titled by the file stem) or from a JSON Lines file of [`Song`] records.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::types::{Song, SongId};

/// Extension of plain-text lyric files.
const LYRIC_EXTENSION: &str = "txt";

/// A lyric file found on disk, before it is read.
#[derive(Debug, Clone)]
struct LyricFile {
    id: String,
    title: String,
    path: PathBuf,
}

/// Find every `.txt` lyric file under the given paths and read it as a song.
///
/// A path may name a file or a directory; directories are walked
/// recursively. Song ids are paths relative to the root they were found
/// under, and results are sorted by id.
pub fn discover_songs(roots: &[PathBuf]) -> Result<Vec<Song>> {
    let start = Instant::now();
    let mut files = Vec::new();

    for root in roots {
        if !root.exists() {
            return Err(Error::io(
                std::io::Error::new(ErrorKind::NotFound, "lyric path does not exist"),
                root.clone(),
            ));
        }
        files.extend(collect_files(root));
    }

    let mut songs = files
        .par_iter()
        .map(|file| {
            let lyrics = fs_err::read_to_string(&file.path)
                .map_err(|e| Error::io(e, file.path.clone()))?;
            Ok(Song {
                id: SongId::new(file.id.clone()),
                title: file.title.clone(),
                lyrics,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    songs.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));

    let count = songs.len();
    let elapsed = start.elapsed();
    tracing::info!("Discovered {count} lyric files in {elapsed:?}");

    Ok(songs)
}

fn collect_files(root: &Path) -> Vec<LyricFile> {
    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == LYRIC_EXTENSION))
        .filter_map(|entry| {
            let title = entry.path().file_stem()?.to_str()?.to_string();
            let relative = entry
                .path()
                .strip_prefix(root)
                .ok()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| entry.path());
            let id = relative.to_string_lossy().to_string();

            Some(LyricFile {
                id,
                title,
                path: entry.path().to_path_buf(),
            })
        })
        .collect()
}

/// Read songs from a JSON Lines file, one [`Song`] object per line.
///
/// Blank lines are skipped. A malformed record fails the whole read with
/// the offending line number.
pub fn read_jsonl(path: &Path) -> Result<Vec<Song>> {
    let text = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;

    let songs = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str::<Song>(line).map_err(|e| {
                Error::parse(format!("line {}: {e}", i + 1), path.to_path_buf())
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::info!("Read {} songs from {}", songs.len(), path.display());
    Ok(songs)
}
