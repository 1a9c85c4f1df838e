//! Debug tool to show how one lyric file moves through the pipeline.
//!
//! Usage:
//!   `cargo run --bin dump_segments -- <lyrics.txt>`
//!   `cargo run --bin dump_segments -- <lyrics.txt> --tokens`
//!
//! Prints the normalized text, the labeled segments, the label sequence and
//! the sanitized lyric the rhyme engine measures.

// Development/debug binary - allow expect/unwrap for simpler error handling
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::env;
use std::path::Path;

use lyricscope::lyrics::tokenize::{text_line_tokens, WordTokenizer};
use lyricscope::lyrics::{label_sequence, normalize, prepare_for_segmentation, sanitize, segment};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <lyrics.txt> [--tokens]", args[0]);
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    let raw = fs_err::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {e}", path.display());
        std::process::exit(1);
    });

    println!("=== Normalized ===");
    println!("{}", normalize(&raw));

    let segments = segment(&prepare_for_segmentation(&raw));
    println!("\n=== Segments ({}) ===", segments.len());
    for (i, seg) in segments.iter().enumerate() {
        println!("--- {i}: {} ({} lines) ---", seg.label, seg.lines.len());
        for line in &seg.lines {
            println!("  {line}");
        }
    }

    let labels: Vec<String> = label_sequence(&segments).iter().map(ToString::to_string).collect();
    println!("\n=== Labels ===");
    println!("{}", labels.join(" "));

    let sanitized = sanitize(&raw, false);
    println!("\n=== Sanitized ===");
    println!("{sanitized}");

    if args.iter().any(|a| a == "--tokens") {
        println!("\n=== Tokens ===");
        for tokens in text_line_tokens(&WordTokenizer, &sanitized) {
            println!("  {}", serde_json::to_string(&tokens).unwrap());
        }
    }
}
