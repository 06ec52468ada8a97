//! CLI module for cuecite.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// cuecite - video transcripts and citation annotation
///
/// Fetches auto-generated captions for a video link, answers literal questions
/// about them, and resolves citation markers in sourced answers.
#[derive(Parser, Debug)]
#[command(name = "cuecite")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CUECITE_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check system requirements and configuration
    Doctor,

    /// Fetch the transcript of a video and optionally ask a question about it
    Transcript {
        /// YouTube URL or video ID
        url: String,

        /// Question to look up in the transcript
        #[arg(short, long)]
        question: Option<String>,

        /// Print the result as JSON (same shape as the HTTP API)
        #[arg(long)]
        json: bool,

        /// Show cue timestamps
        #[arg(short, long)]
        timestamps: bool,
    },

    /// Resolve citation markers in text against a JSON list of sources
    Annotate {
        /// Text containing markers such as [1] or [1, 2]
        text: String,

        /// JSON file holding the ordered source list
        #[arg(short, long)]
        sources: String,

        /// Print the speech rendering (markers removed) instead
        #[arg(long)]
        speech: bool,

        /// Print segments as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (defaults to server.host from config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port from config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
