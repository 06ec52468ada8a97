//! Video references extracted from YouTube URLs.

use crate::error::{CueciteError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static VIDEO_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        (?:
            # Watch, embed, shorts and short-link URLs
            (?:
                youtube\.com/watch\?(?:[^\#\s]*&)?v=
                | youtube\.com/(?:embed|v|shorts|live)/
                | youtu\.be/
            )
            ([A-Za-z0-9_-]{11})
            (?:[^A-Za-z0-9_-]|$)
        )
        |
        # Bare video ID (11 characters)
        ^([A-Za-z0-9_-]{11})$
        ",
    )
    .expect("Invalid regex")
});

/// Canonical 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoReference(String);

impl VideoReference {
    /// Extract the identifier from any accepted URL form or a bare ID.
    pub fn extract(input: &str) -> Option<Self> {
        let caps = VIDEO_ID_REGEX.captures(input.trim())?;

        // Try group 1 (URL format) then group 2 (bare ID)
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| Self(m.as_str().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for VideoReference {
    type Err = CueciteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::extract(s)
            .ok_or_else(|| CueciteError::InvalidInput(format!("Not a YouTube video URL: {}", s)))
    }
}

impl TryFrom<String> for VideoReference {
    type Error = CueciteError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<VideoReference> for String {
    fn from(value: VideoReference) -> Self {
        value.0
    }
}
