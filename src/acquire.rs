//! Transcript acquisition pipeline.
//!
//! Coordinates the caption tool, the caption parser and the metadata lookup
//! for a single video URL. Every call works in its own scratch directory,
//! which is removed when the call returns, however it returns.

use crate::captions::{self, CaptionTool, YtDlpTool};
use crate::config::Settings;
use crate::error::{CueciteError, Result};
use crate::metadata::{MetadataFetcher, OEmbedFetcher};
use crate::transcript::{AcquiredVideo, Transcript};
use crate::video::VideoReference;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Extensions of caption artifacts the parser understands.
const CAPTION_EXTENSIONS: &[&str] = &["vtt", "json3", "json"];

/// Acquires transcripts and metadata for video URLs.
pub struct TranscriptAcquirer {
    tool: Arc<dyn CaptionTool>,
    metadata: Arc<dyn MetadataFetcher>,
    scratch_root: PathBuf,
}

impl TranscriptAcquirer {
    /// Create an acquirer backed by yt-dlp and the oEmbed endpoint.
    pub fn new(settings: &Settings) -> Result<Self> {
        let tool: Arc<dyn CaptionTool> = Arc::new(YtDlpTool::from_settings(&settings.captions));
        let metadata: Arc<dyn MetadataFetcher> =
            Arc::new(OEmbedFetcher::from_settings(&settings.metadata)?);

        Ok(Self::with_components(tool, metadata, settings.scratch_dir()))
    }

    /// Create an acquirer with custom components.
    pub fn with_components(
        tool: Arc<dyn CaptionTool>,
        metadata: Arc<dyn MetadataFetcher>,
        scratch_root: PathBuf,
    ) -> Self {
        Self {
            tool,
            metadata,
            scratch_root,
        }
    }

    pub fn scratch_root(&self) -> &Path {
        &self.scratch_root
    }

    /// Acquire the transcript and metadata for `url`.
    ///
    /// Nothing external is touched unless `url` names a video. The caption
    /// tool and the metadata lookup run concurrently; the first failure
    /// cancels the other and fails the call.
    #[instrument(skip(self))]
    pub async fn acquire(&self, url: &str) -> Result<AcquiredVideo> {
        let video = VideoReference::extract(url)
            .ok_or_else(|| CueciteError::InvalidInput(format!("Not a YouTube video URL: {}", url)))?;

        tokio::fs::create_dir_all(&self.scratch_root).await?;
        let scratch = self.scratch_dir(&video).await?;
        debug!("Scratch directory {:?}", scratch.path());

        let (transcript, metadata) = tokio::try_join!(
            self.fetch_transcript(&video, scratch.path()),
            self.metadata.fetch(&video)
        )?;

        info!("Acquired {} cues for {}", transcript.cues.len(), video);

        Ok(AcquiredVideo {
            transcript,
            metadata,
        })
    }

    /// Like [`acquire`](Self::acquire), but folds every "no transcript for
    /// this video" outcome into `Ok(None)`.
    ///
    /// Only failures of the service itself (scratch space, I/O) remain errors.
    pub async fn acquire_or_absent(&self, url: &str) -> Result<Option<AcquiredVideo>> {
        match self.acquire(url).await {
            Ok(video) => Ok(Some(video)),
            Err(e) if e.is_environmental() => {
                error!("Caption tool unavailable: {}", e);
                Ok(None)
            }
            Err(e) if e.is_absent() => {
                info!("Transcript not available for {}: {}", url, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Allocate a fresh directory under the scratch root, named after the video.
    async fn scratch_dir(&self, video: &VideoReference) -> Result<tempfile::TempDir> {
        let root = self.scratch_root.clone();
        let prefix = format!("{}-", video);

        tokio::task::spawn_blocking(move || {
            tempfile::Builder::new().prefix(&prefix).tempdir_in(&root)
        })
        .await
        .map_err(std::io::Error::other)?
        .map_err(CueciteError::from)
    }

    async fn fetch_transcript(&self, video: &VideoReference, dir: &Path) -> Result<Transcript> {
        let exit = self.tool.fetch_captions(video, dir).await?;

        if !exit.success() {
            return Err(CueciteError::ToolFailed(format!(
                "{} exited with {}: {}",
                self.tool.name(),
                exit.code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "signal".to_string()),
                exit.stderr
            )));
        }

        let artifact = find_caption_file(dir, video).await?.ok_or_else(|| {
            CueciteError::CaptionsMissing(format!("no caption file written for {}", video))
        })?;
        debug!("Parsing caption artifact {:?}", artifact);

        let document = tokio::fs::read(&artifact).await?;
        let cues = captions::parse_bytes(&document)?;

        if cues.is_empty() {
            return Err(CueciteError::CaptionsMissing(format!(
                "caption track for {} has no cues",
                video
            )));
        }

        Ok(Transcript::new(video.clone(), cues))
    }
}

/// Locates the caption artifact the tool wrote for `video`.
///
/// English tracks are preferred when several languages were written.
async fn find_caption_file(dir: &Path, video: &VideoReference) -> Result<Option<PathBuf>> {
    let prefix = format!("{}.", video);
    let mut candidates: Vec<PathBuf> = Vec::new();

    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let name_matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(&prefix));
        let ext_matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| CAPTION_EXTENSIONS.contains(&e));
        if name_matches && ext_matches {
            candidates.push(path);
        }
    }

    candidates.sort_by_key(|path| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        (!name.contains(".en."), name)
    });

    Ok(candidates.into_iter().next())
}
