//! Video title and thumbnail lookup through the public oEmbed endpoint.

use crate::config::MetadataSettings;
use crate::error::{CueciteError, Result};
use crate::video::VideoReference;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Display metadata for a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub thumbnail_url: String,
}

/// Resolves a video reference to its display metadata.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch(&self, video: &VideoReference) -> Result<VideoMetadata>;
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: String,
    thumbnail_url: String,
}

/// Fetches metadata from a YouTube-compatible oEmbed endpoint.
pub struct OEmbedFetcher {
    client: reqwest::Client,
    endpoint: url::Url,
}

impl OEmbedFetcher {
    pub fn from_settings(settings: &MetadataSettings) -> Result<Self> {
        let endpoint = url::Url::parse(&settings.endpoint)
            .map_err(|e| CueciteError::Config(format!("invalid oEmbed endpoint: {}", e)))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| CueciteError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    /// Request URL for a video: `<endpoint>?url=<watch-url>&format=json`.
    fn request_url(&self, video: &VideoReference) -> url::Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("url", &video.watch_url())
            .append_pair("format", "json");
        url
    }
}

#[async_trait]
impl MetadataFetcher for OEmbedFetcher {
    #[instrument(skip(self), fields(video_id = %video))]
    async fn fetch(&self, video: &VideoReference) -> Result<VideoMetadata> {
        let url = self.request_url(video);
        debug!("Fetching oEmbed metadata from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CueciteError::MetadataFetch(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CueciteError::MetadataFetch(format!(
                "oEmbed endpoint returned {}",
                status
            )));
        }

        let body: OEmbedResponse = response
            .json()
            .await
            .map_err(|e| CueciteError::MetadataFetch(format!("invalid oEmbed response: {}", e)))?;

        Ok(VideoMetadata {
            title: body.title,
            thumbnail_url: body.thumbnail_url,
        })
    }
}
