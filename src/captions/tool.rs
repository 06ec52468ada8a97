//! External caption download tool.
//!
//! The subprocess is hidden behind [`CaptionTool`] so acquisition can be
//! exercised without spawning processes or touching the network.

use crate::config::CaptionSettings;
use crate::error::{CueciteError, Result};
use crate::video::VideoReference;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, instrument};

/// How a caption tool run terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExit {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// Captured standard error, for diagnostics.
    pub stderr: String,
}

impl ToolExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Capability to download a video's caption track into a directory.
#[async_trait]
pub trait CaptionTool: Send + Sync {
    /// Human-readable tool name for logs.
    fn name(&self) -> &str;

    /// Run the tool once for `video`, writing artifacts into `destination`.
    ///
    /// An `Err` means the tool could not be run (or did not finish); a clean
    /// non-zero exit is reported through [`ToolExit`].
    async fn fetch_captions(&self, video: &VideoReference, destination: &Path) -> Result<ToolExit>;
}

/// yt-dlp restricted to automatically generated captions.
pub struct YtDlpTool {
    binary: String,
    language: String,
    timeout: Duration,
}

impl YtDlpTool {
    pub fn new() -> Self {
        Self::from_settings(&CaptionSettings::default())
    }

    pub fn from_settings(settings: &CaptionSettings) -> Self {
        Self {
            binary: settings.tool.clone(),
            language: settings.language.clone(),
            timeout: Duration::from_secs(settings.timeout_seconds),
        }
    }

    /// Command-line arguments for a run.
    fn args(&self, video: &VideoReference, destination: &Path) -> Vec<OsString> {
        let template = destination.join(format!("{}.%(ext)s", video));

        let mut args: Vec<OsString> = [
            "--skip-download",
            "--write-auto-subs",
            "--sub-langs",
            self.language.as_str(),
            "--sub-format",
            "vtt",
            "--no-playlist",
            "--quiet",
            "--no-warnings",
            "--output",
        ]
        .iter()
        .map(OsString::from)
        .collect();

        args.push(template.into_os_string());
        args.push(OsString::from(video.watch_url()));
        args
    }
}

impl Default for YtDlpTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptionTool for YtDlpTool {
    fn name(&self) -> &str {
        &self.binary
    }

    #[instrument(skip(self, destination), fields(video_id = %video))]
    async fn fetch_captions(&self, video: &VideoReference, destination: &Path) -> Result<ToolExit> {
        debug!("Running {} into {:?}", self.binary, destination);

        let mut command = Command::new(&self.binary);
        command
            .args(self.args(video, destination))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let result = tokio::time::timeout(self.timeout, command.output()).await.map_err(|_| {
            CueciteError::ToolFailed(format!(
                "{} timed out after {}s",
                self.binary,
                self.timeout.as_secs()
            ))
        })?;

        let output = match result {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CueciteError::ToolNotFound(self.binary.clone()));
            }
            Err(e) => {
                return Err(CueciteError::ToolExecution(format!(
                    "{} execution failed: {e}",
                    self.binary
                )));
            }
        };

        Ok(ToolExit {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
