//! Caption tracks: parsing timed-text documents and fetching them with an
//! external caption tool.

mod json;
mod tool;
mod webvtt;

pub use tool::{CaptionTool, ToolExit, YtDlpTool};

use crate::error::{CueciteError, Result};
use serde::{Deserialize, Serialize};

/// A single timed caption unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionCue {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Caption text.
    pub text: String,
}

impl CaptionCue {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Parse a caption document into cues, in document order.
///
/// WebVTT documents and JSON cue documents are both accepted; the format is
/// chosen from the first non-whitespace content.
pub fn parse(document: &str) -> Result<Vec<CaptionCue>> {
    let trimmed = document.trim_start_matches('\u{feff}').trim();

    if trimmed.is_empty() {
        return Err(CueciteError::Parse("empty caption document".to_string()));
    }

    if trimmed.starts_with("WEBVTT") {
        webvtt::parse(trimmed)
    } else if trimmed.starts_with('[') || trimmed.starts_with('{') {
        json::parse(trimmed)
    } else {
        Err(CueciteError::Parse(
            "unrecognised caption format (expected WebVTT or JSON)".to_string(),
        ))
    }
}

/// Parse caption bytes, rejecting invalid UTF-8.
pub fn parse_bytes(document: &[u8]) -> Result<Vec<CaptionCue>> {
    let text = std::str::from_utf8(document)
        .map_err(|e| CueciteError::Parse(format!("caption document is not UTF-8: {}", e)))?;
    parse(text)
}

/// Flatten cues into a transcript body.
pub fn cues_to_text(cues: &[CaptionCue]) -> String {
    cues.iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
