//! Configuration settings for cuecite.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub captions: CaptionSettings,
    pub metadata: MetadataSettings,
    pub server: ServerSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Root under which per-request scratch directories are created.
    pub scratch_dir: String,
    /// Log level when no -v flag is given (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            scratch_dir: "/tmp/cuecite".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Caption download tool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionSettings {
    /// Caption download binary (resolved through PATH).
    pub tool: String,
    /// Subtitle language requested from the tool.
    pub language: String,
    /// Upper bound on a single tool run, in seconds.
    pub timeout_seconds: u64,
}

impl Default for CaptionSettings {
    fn default() -> Self {
        Self {
            tool: "yt-dlp".to_string(),
            language: "en".to_string(),
            timeout_seconds: 120,
        }
    }
}

/// Video metadata (oEmbed) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSettings {
    /// oEmbed endpoint queried for title and thumbnail.
    pub endpoint: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://www.youtube.com/oembed".to_string(),
            timeout_seconds: 10,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            settings.validate()?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Reject values that would make every acquisition fail.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.captions.tool.trim().is_empty() {
            return Err(crate::error::CueciteError::Config(
                "captions.tool must not be empty".to_string(),
            ));
        }
        if self.captions.timeout_seconds == 0 || self.metadata.timeout_seconds == 0 {
            return Err(crate::error::CueciteError::Config(
                "timeouts must be at least one second".to_string(),
            ));
        }
        url::Url::parse(&self.metadata.endpoint).map_err(|e| {
            crate::error::CueciteError::Config(format!("metadata.endpoint: {}", e))
        })?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cuecite")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded scratch root.
    pub fn scratch_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.scratch_dir)
    }
}
