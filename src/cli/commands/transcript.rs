//! Transcript command implementation.

use crate::acquire::TranscriptAcquirer;
use crate::answer::{AnswerStrategy, SentenceSearch};
use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::transcript::format_timestamp;
use anyhow::Result;

/// Run the transcript command.
pub async fn run_transcript(
    url: &str,
    question: Option<&str>,
    json: bool,
    timestamps: bool,
    settings: Settings,
) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check_caption_tool(&settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'cuecite doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let acquirer = TranscriptAcquirer::new(&settings)?;

    let spinner = Output::spinner("Fetching captions...");
    let result = acquirer.acquire(url).await;
    spinner.finish_and_clear();

    let video = match result {
        Ok(video) => video,
        Err(e) => {
            Output::error(&format!("Transcript not available: {}", e));
            return Err(e.into());
        }
    };

    let answer = question
        .filter(|q| !q.is_empty())
        .map(|q| SentenceSearch.find_answer(&video.transcript.text, q));

    if json {
        let mut body = serde_json::json!({
            "transcript": video.transcript.text,
            "title": video.metadata.title,
            "thumbnail": video.metadata.thumbnail_url,
        });
        if let Some(answer) = &answer {
            body["answer"] = serde_json::Value::String(answer.clone());
        }
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    Output::header(&video.metadata.title);
    Output::kv("Video", &video.transcript.video.watch_url());
    Output::kv("Thumbnail", &video.metadata.thumbnail_url);
    Output::kv("Cues", &video.transcript.cues.len().to_string());
    Output::kv(
        "Duration",
        &format_timestamp(video.transcript.duration_seconds()),
    );
    println!();

    if timestamps {
        println!("{}", video.transcript.format_with_timestamps());
    } else {
        println!("{}", video.transcript.text);
    }

    if let (Some(question), Some(answer)) = (question, answer) {
        Output::header(&format!("Q: {}", question));
        println!("{}", answer);
    }

    Ok(())
}
