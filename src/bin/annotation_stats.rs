//! Debug tool to survey how a lyric collection is annotated.
//!
//! Usage:
//!   `cargo run --bin annotation_stats -- <dir-or-file.txt>...`
//!   `cargo run --bin annotation_stats -- --jsonl <songs.jsonl>`
//!
//! Prints how many lyrics carry `[...]` decorations or annotation words, the
//! most common bracket texts and the segment count per label.

// Development/debug binary - allow expect/unwrap for simpler error handling
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::env;
use std::path::PathBuf;

use lyricscope::constants::survey::TOP_ANNOTATIONS;
use lyricscope::services::AnnotationSurvey;
use lyricscope::utils::lyric_files::{discover_songs, read_jsonl};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <dir-or-file.txt>...", args[0]);
        eprintln!("       {} --jsonl <songs.jsonl>", args[0]);
        std::process::exit(1);
    }

    let songs = if args[1] == "--jsonl" {
        let path = args.get(2).map(PathBuf::from).unwrap_or_else(|| {
            eprintln!("--jsonl needs a file argument");
            std::process::exit(1);
        });
        read_jsonl(&path)
    } else {
        let roots: Vec<PathBuf> = args[1..].iter().map(PathBuf::from).collect();
        discover_songs(&roots)
    }
    .unwrap_or_else(|e| {
        eprintln!("Failed to load songs: {e}");
        std::process::exit(1);
    });

    let survey = AnnotationSurvey::from_songs(&songs);

    println!("=== Songs ({}) ===", survey.songs());
    println!("  with decoration:  {}", survey.decorated());
    println!("  with annotations: {}", survey.worded());
    match survey.leading_percent() {
        Some(percent) => println!("  opening with [...]: {} ({percent:.1}%)", survey.leading()),
        None => println!("  opening with [...]: 0"),
    }

    println!("\n=== {TOP_ANNOTATIONS} most common annotations ===");
    for (text, count) in survey.most_common(TOP_ANNOTATIONS) {
        println!("  {text}: {count}");
    }

    println!("\n=== Segments by label ===");
    for (label, count) in survey.segments_by_label() {
        println!("  {:<10} {count}", label.name());
    }
}
