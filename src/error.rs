//! Error types for cuecite.

use thiserror::Error;

/// Library-level error type for cuecite operations.
#[derive(Error, Debug)]
pub enum CueciteError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Caption parse error: {0}")]
    Parse(String),

    #[error("No captions available: {0}")]
    CaptionsMissing(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool could not be run: {0}")]
    ToolExecution(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),

    #[error("Metadata fetch failed: {0}")]
    MetadataFetch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl CueciteError {
    /// Whether this failure means "no transcript for this video" rather than a
    /// fault in the service itself.
    pub fn is_absent(&self) -> bool {
        matches!(
            self,
            CueciteError::InvalidInput(_)
                | CueciteError::Parse(_)
                | CueciteError::CaptionsMissing(_)
                | CueciteError::ToolNotFound(_)
                | CueciteError::ToolExecution(_)
                | CueciteError::ToolFailed(_)
                | CueciteError::MetadataFetch(_)
        )
    }

    /// Whether this failure points at the host environment (tool missing or
    /// not executable) rather than at the requested video.
    pub fn is_environmental(&self) -> bool {
        matches!(
            self,
            CueciteError::ToolNotFound(_) | CueciteError::ToolExecution(_)
        )
    }
}

/// Result type alias for cuecite operations.
pub type Result<T> = std::result::Result<T, CueciteError>;
