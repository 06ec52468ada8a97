//! Transcript data model.

use crate::captions::{cues_to_text, CaptionCue};
use crate::metadata::VideoMetadata;
use crate::video::VideoReference;
use serde::{Deserialize, Serialize};

/// Flat transcript of a video's caption track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Video this transcript belongs to.
    pub video: VideoReference,
    /// Cues in document order.
    pub cues: Vec<CaptionCue>,
    /// Cue texts joined with a single space.
    pub text: String,
}

impl Transcript {
    /// Create a transcript from parsed cues.
    pub fn new(video: VideoReference, cues: Vec<CaptionCue>) -> Self {
        let text = cues_to_text(&cues);
        Self { video, cues, text }
    }

    /// Total duration in seconds, taken from the last cue.
    pub fn duration_seconds(&self) -> f64 {
        self.cues.last().map(|c| c.end).unwrap_or(0.0)
    }

    /// Format the transcript with timestamps for display.
    pub fn format_with_timestamps(&self) -> String {
        self.cues
            .iter()
            .map(|c| format!("[{}] {}", format_timestamp(c.start), c.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A transcript together with its video's display metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquiredVideo {
    pub transcript: Transcript,
    pub metadata: VideoMetadata,
}

/// Format seconds as MM:SS or HH:MM:SS.
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}
