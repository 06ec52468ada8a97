//! CLI output formatting utilities.

use crate::citation::{Segment, Source};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print annotated text with citations highlighted, followed by the
    /// sources they point at.
    pub fn annotated(segments: &[Segment], sources: &[Source]) {
        let mut cited = Vec::new();
        let mut line = String::new();

        for segment in segments {
            match segment {
                Segment::Text { text } => line.push_str(text),
                Segment::Citation { source_index, .. } => {
                    line.push_str(&style(format!("[{}]", source_index + 1)).cyan().to_string());
                    if !cited.contains(source_index) {
                        cited.push(*source_index);
                    }
                }
            }
        }
        println!("{}", line);

        if !cited.is_empty() {
            Output::header("Sources");
            for index in cited {
                let Some(source) = sources.get(index) else {
                    continue;
                };
                let preview = content_preview(source.display_text(), 120);
                println!("  {} {}", style(format!("[{}]", index + 1)).cyan(), preview);
                if let Some(url) = &source.metadata.url {
                    println!("      {}", style(url).dim());
                }
            }
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Truncate content with ellipsis.
fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        let truncated: String = content.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}
