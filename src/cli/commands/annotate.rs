//! Annotate command implementation.

use crate::citation::{self, Source};
use crate::cli::Output;
use anyhow::{Context, Result};

/// Run the annotate command.
pub fn run_annotate(text: &str, sources_path: &str, speech: bool, json: bool) -> Result<()> {
    let path = crate::config::Settings::expand_path(sources_path);
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read sources from {}", path.display()))?;
    let sources: Vec<Source> =
        serde_json::from_str(&raw).context("Sources file must be a JSON array of sources")?;

    if speech {
        println!("{}", citation::strip_for_speech(text));
        return Ok(());
    }

    let segments = citation::annotate(text, &sources);

    if json {
        println!("{}", serde_json::to_string_pretty(&segments)?);
    } else {
        Output::annotated(&segments, &sources);
    }

    Ok(())
}
