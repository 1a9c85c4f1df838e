//! Whitespace canonicalization and repeat-marker expansion.
//!
//! Lyric sites write repeated lines as `la la [x2]` and repeated paragraphs as
//! a standalone `[x2]` line at the top or bottom of the paragraph. `normalize`
//! spells those repetitions out so later stages see every sung line.
//! Ambiguous multipliers such as `[?x]` or `[x?]` are left as they are.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::normalize::MAX_REPEAT;

/// `<content>[x<N>]` or `<content>[<N>x]` filling a whole line.
#[allow(clippy::expect_used)]
static RE_LINE_REPEAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<text>[^\[\n]+)\[(?:x(?P<pre>[0-9]+)|(?P<post>[0-9]+)x)\]$")
        .expect("valid regex: RE_LINE_REPEAT")
});

/// A line consisting of nothing but a repeat marker.
#[allow(clippy::expect_used)]
static RE_MARKER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(?:x(?P<pre>[0-9]+)|(?P<post>[0-9]+)x)\]$").expect("valid regex: RE_MARKER_LINE")
});

/// Normalize raw lyric text.
///
/// Applies, in order: whitespace cleanup, line-trailing repeat expansion,
/// paragraph repeat expansion, a second whitespace cleanup and blank-line
/// collapsing. The result is a fixed point: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let cleaned = clean_whitespace(text);
    let expanded = expand_repeat_markers(&cleaned);
    collapse_blank_lines(&clean_whitespace(&expanded))
}

/// Trim the text, unify line terminators to `\n`, trim every line and
/// collapse runs of horizontal whitespace to one space.
pub fn clean_whitespace(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    unified
        .trim()
        .split('\n')
        .map(collapse_spaces)
        .collect::<Vec<_>>()
        .join("\n")
}

fn collapse_spaces(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for word in line.split(char::is_whitespace).filter(|w| !w.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Collapse every run of two or more blank lines into a single blank line.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut previous_blank = false;

    for line in text.split('\n') {
        let blank = line.is_empty();
        if blank && previous_blank {
            continue;
        }
        out.push(line);
        previous_blank = blank;
    }

    out.join("\n")
}

/// Expand both repeat-marker forms. Expects whitespace-clean input.
pub fn expand_repeat_markers(text: &str) -> String {
    let lines = expand_line_markers(text);
    expand_paragraph_markers(&lines)
}

/// Replace `<content>[xN]` lines with N copies of `<content>`.
fn expand_line_markers(text: &str) -> Vec<String> {
    let mut out = Vec::new();

    for line in text.split('\n') {
        let expansion = RE_LINE_REPEAT.captures(line).and_then(|caps| {
            let count = multiplier(&caps)?;
            let content = caps.name("text")?.as_str().trim_end();
            (!content.is_empty()).then(|| (content.to_string(), count))
        });

        match expansion {
            Some((content, count)) => out.extend(std::iter::repeat(content).take(count)),
            None => out.push(line.to_string()),
        }
    }

    out
}

/// Repeat paragraphs that open or close with a standalone marker line.
///
/// Markers stacked on both edges multiply (capped at [`MAX_REPEAT`]) so that
/// no expanded copy still carries a marker on its edge.
fn expand_paragraph_markers(lines: &[String]) -> String {
    let mut blocks: Vec<String> = Vec::new();

    for paragraph in lines.split(|l| l.is_empty()) {
        let mut body = paragraph;
        let mut count = 1usize;

        loop {
            if let Some((first, rest)) = body.split_first() {
                if let Some(n) = marker_line(first) {
                    count = count.saturating_mul(n).min(MAX_REPEAT);
                    body = rest;
                    continue;
                }
            }
            if let Some((last, rest)) = body.split_last() {
                if let Some(n) = marker_line(last) {
                    count = count.saturating_mul(n).min(MAX_REPEAT);
                    body = rest;
                    continue;
                }
            }
            break;
        }

        if body.is_empty() {
            continue;
        }

        let block = body.join("\n");
        blocks.extend(std::iter::repeat(block).take(count));
    }

    blocks.join("\n\n")
}

fn marker_line(line: &str) -> Option<usize> {
    RE_MARKER_LINE.captures(line).and_then(|caps| multiplier(&caps))
}

/// Read the multiplier from either marker spelling, rejecting 0 and
/// anything above [`MAX_REPEAT`].
fn multiplier(caps: &regex::Captures<'_>) -> Option<usize> {
    let digits = caps.name("pre").or_else(|| caps.name("post"))?.as_str();
    digits
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=MAX_REPEAT).contains(n))
}
