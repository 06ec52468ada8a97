//! Detail view of a single cited source.

use super::{Source, SourceKind};
use regex::RegexBuilder;
use serde::Serialize;
use std::ops::Range;

/// Everything a detail panel needs to show one citation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceInspection {
    /// 0-based index into the source list.
    pub index: usize,
    /// Panel heading, e.g. `Citation [2]`.
    pub heading: String,
    pub kind: Option<SourceKind>,
    pub url: Option<String>,
    /// Content to display.
    pub content: String,
    /// Passage the answer relied on, if the source named one.
    pub highlight: Option<String>,
    /// Byte ranges of `highlight` within `content`.
    pub highlight_ranges: Vec<Range<usize>>,
}

/// Resolve `sources[index]` for display.
///
/// Document sources (`pdf`, `web`) show their full content with the highlight
/// passage located in it; other sources show their display text only.
pub fn inspect(sources: &[Source], index: usize) -> Option<SourceInspection> {
    let source = sources.get(index)?;
    let highlight = source
        .metadata
        .highlight_text
        .clone()
        .filter(|h| !h.is_empty());

    let is_document = matches!(
        source.metadata.kind,
        Some(SourceKind::Pdf) | Some(SourceKind::Web)
    );

    let (content, highlight_ranges) = if is_document {
        let ranges = highlight
            .as_deref()
            .map(|h| highlight_ranges(&source.content, h))
            .unwrap_or_default();
        (source.content.clone(), ranges)
    } else {
        (source.display_text().to_string(), Vec::new())
    };

    Some(SourceInspection {
        index,
        heading: format!("Citation [{}]", index + 1),
        kind: source.metadata.kind.clone(),
        url: source.metadata.url.clone(),
        content,
        highlight,
        highlight_ranges,
    })
}

/// Case-insensitive, non-overlapping occurrences of `needle` in `content`.
pub fn highlight_ranges(content: &str, needle: &str) -> Vec<Range<usize>> {
    if needle.is_empty() {
        return Vec::new();
    }

    match RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re.find_iter(content).map(|m| m.range()).collect(),
        Err(_) => Vec::new(),
    }
}
