//! Configuration module for cuecite.
//!
//! Handles loading and validating application settings.

mod settings;

pub use settings::{
    CaptionSettings, GeneralSettings, MetadataSettings, ServerSettings, Settings,
};
