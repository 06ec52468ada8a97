//! Citation markers in generated answers.
//!
//! Answers reference their sources with bracketed 1-based indices such as
//! `[3]` or `[1, 2]`. [`annotate`] turns such text into a sequence of
//! [`Segment`]s that a renderer can show as hoverable citations, and
//! [`inspect`] resolves a selected citation for a detail view.

mod annotate;
mod inspect;

pub use annotate::{annotate, render_markers, strip_for_speech};
pub use inspect::{highlight_ranges, inspect, SourceInspection};

use serde::{Deserialize, Serialize};

/// A retrieved document an answer may cite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, alias = "pageContent")]
    pub content: String,
    #[serde(default)]
    pub metadata: SourceMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SourceKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_text: Option<String>,
}

/// Document kind of a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceKind {
    Pdf,
    Web,
    Other(String),
}

impl From<String> for SourceKind {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "pdf" => SourceKind::Pdf,
            "web" => SourceKind::Web,
            _ => SourceKind::Other(value),
        }
    }
}

impl From<SourceKind> for String {
    fn from(value: SourceKind) -> Self {
        match value {
            SourceKind::Pdf => "pdf".to_string(),
            SourceKind::Web => "web".to_string(),
            SourceKind::Other(s) => s,
        }
    }
}

impl Source {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: SourceMetadata::default(),
        }
    }

    /// Text shown for this source: its content, else its title, else its URL.
    pub fn display_text(&self) -> &str {
        let title = self.metadata.title.as_deref().filter(|t| !t.is_empty());
        let url = self.metadata.url.as_deref().filter(|u| !u.is_empty());

        if !self.content.is_empty() {
            &self.content
        } else {
            title.or(url).unwrap_or("")
        }
    }
}

/// One unit of annotated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// Literal text, including unresolvable markers.
    Text { text: String },
    /// A resolved reference to `sources[source_index]`.
    Citation { source_index: usize, label: String },
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text { text: text.into() }
    }

    pub fn citation(source_index: usize, label: impl Into<String>) -> Self {
        Segment::Citation {
            source_index,
            label: label.into(),
        }
    }
}
