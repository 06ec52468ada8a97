//! cuecite - video transcripts and citation annotation
//!
//! A small service and CLI that turns a YouTube link into a plain-text
//! transcript by way of the video's auto-generated captions, and resolves
//! numbered citation markers in sourced answers.
//!
//! # Overview
//!
//! cuecite allows you to:
//! - Fetch the caption transcript and oEmbed metadata of a video
//! - Look up a literal answer to a question in the transcript
//! - Split answer text into text and citation segments
//! - Serve all of the above over a small JSON HTTP API
//!
//! # Architecture
//!
//! - `config` - Configuration management
//! - `video` - Video reference extraction from links
//! - `captions` - Caption tool invocation and caption file parsing
//! - `metadata` - oEmbed metadata lookup
//! - `acquire` - Per-request pipeline coordination
//! - `answer` - Naive answer extraction
//! - `citation` - Citation marker annotation and inspection
//! - `server` - HTTP API
//!
//! # Example
//!
//! ```rust,no_run
//! use cuecite::acquire::TranscriptAcquirer;
//! use cuecite::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let acquirer = TranscriptAcquirer::new(&settings)?;
//!
//!     let video = acquirer.acquire("https://youtu.be/dQw4w9WgXcQ").await?;
//!     println!("{}: {}", video.metadata.title, video.transcript.text);
//!
//!     Ok(())
//! }
//! ```

pub mod acquire;
pub mod answer;
pub mod captions;
pub mod citation;
pub mod cli;
pub mod config;
pub mod error;
pub mod metadata;
pub mod server;
pub mod transcript;
pub mod video;

#[cfg(test)]
mod testing;

pub use error::{CueciteError, Result};
