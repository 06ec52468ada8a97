//! Tokenizing citation markers.

use super::{Segment, Source};
use regex::Regex;
use std::sync::LazyLock;

/// A bracket group with no nested brackets: `[3]`, `[1, 2]`, `[see below]`.
static BRACKET_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\[\]]+\]").expect("Invalid regex"));

/// A single numeric marker: `[3]`.
static NUMERIC_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+\]").expect("Invalid regex"));

/// Split `text` into literal text and resolved citations.
///
/// Each comma-separated token of a bracket group is resolved on its own. A
/// token that is not a positive integer addressing an existing source is kept
/// as literal `[token]` text; a group that consists of a single unresolvable
/// token is kept exactly as written.
pub fn annotate(text: &str, sources: &[Source]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for group in BRACKET_GROUP.find_iter(text) {
        push_text(&mut segments, &text[last..group.start()]);

        let raw = group.as_str();
        let inner = &raw[1..raw.len() - 1];
        let tokens: Vec<&str> = inner.split(',').map(str::trim).collect();

        if let [token] = tokens.as_slice() {
            match resolve(token, sources) {
                Some(index) => segments.push(citation(index, sources)),
                None => segments.push(Segment::text(raw)),
            }
        } else {
            for token in tokens {
                match resolve(token, sources) {
                    Some(index) => segments.push(citation(index, sources)),
                    None => segments.push(Segment::text(format!("[{}]", token))),
                }
            }
        }

        last = group.end();
    }

    push_text(&mut segments, &text[last..]);
    segments
}

/// Remove every `[<digits>]` marker, resolvable or not, for speech output.
pub fn strip_for_speech(text: &str) -> String {
    NUMERIC_MARKER.replace_all(text, "").into_owned()
}

/// Write segments back out as text, citations as `[n]`.
pub fn render_markers(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Text { text } => text.clone(),
            Segment::Citation { source_index, .. } => format!("[{}]", source_index + 1),
        })
        .collect()
}

/// 0-based source index for a 1-based token, if it addresses a source.
fn resolve(token: &str, sources: &[Source]) -> Option<usize> {
    let number: usize = token.parse().ok()?;
    let index = number.checked_sub(1)?;
    (index < sources.len()).then_some(index)
}

fn citation(index: usize, sources: &[Source]) -> Segment {
    Segment::citation(index, sources[index].display_text())
}

fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if !text.is_empty() {
        segments.push(Segment::text(text));
    }
}
