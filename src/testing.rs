//! Test doubles for the acquisition seams.

use crate::captions::{CaptionTool, ToolExit};
use crate::error::{CueciteError, Result};
use crate::metadata::{MetadataFetcher, VideoMetadata};
use crate::video::VideoReference;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const VTT: &str = "WEBVTT\nKind: captions\nLanguage: en\n\n\
00:00:00.000 --> 00:00:02.000\nWe're no strangers to love\n\n\
00:00:02.000 --> 00:00:04.000\nYou know the rules. And so do I\n\n\
00:00:04.000 --> 00:00:06.000\nNow the chorus. Never gonna give you up\n";

pub enum Behavior {
    /// Write a file with this name and content, exit 0.
    Write(&'static str, &'static str),
    /// Exit with this code without writing anything.
    Exit(i32),
    /// Behave as if the binary is not installed.
    NotFound,
}

pub struct FakeTool {
    behavior: Behavior,
    calls: AtomicUsize,
    destinations: Mutex<Vec<PathBuf>>,
}

impl FakeTool {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            destinations: Mutex::new(Vec::new()),
        })
    }

    /// Writes a well-formed English track for any video.
    pub fn with_captions() -> Arc<Self> {
        Self::new(Behavior::Write("dQw4w9WgXcQ.en.vtt", VTT))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn destinations(&self) -> Vec<PathBuf> {
        self.destinations.lock().unwrap().clone()
    }
}

#[async_trait]
impl CaptionTool for FakeTool {
    fn name(&self) -> &str {
        "fake-tool"
    }

    async fn fetch_captions(&self, _video: &VideoReference, destination: &Path) -> Result<ToolExit> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.destinations.lock().unwrap().push(destination.to_path_buf());
        assert!(destination.is_dir());

        match &self.behavior {
            Behavior::Write(name, content) => {
                std::fs::write(destination.join(name), content)?;
                Ok(ToolExit {
                    code: Some(0),
                    stderr: String::new(),
                })
            }
            Behavior::Exit(code) => Ok(ToolExit {
                code: Some(*code),
                stderr: "ERROR: no subtitles".to_string(),
            }),
            Behavior::NotFound => Err(CueciteError::ToolNotFound("fake-tool".into())),
        }
    }
}

pub struct FakeMetadata {
    fail: bool,
    calls: AtomicUsize,
}

impl FakeMetadata {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataFetcher for FakeMetadata {
    async fn fetch(&self, video: &VideoReference) -> Result<VideoMetadata> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CueciteError::MetadataFetch("503 Service Unavailable".into()));
        }
        Ok(VideoMetadata {
            title: "Never Gonna Give You Up".to_string(),
            thumbnail_url: format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", video),
        })
    }
}
