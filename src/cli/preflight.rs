//! Pre-flight checks before operations that need external tools.
//!
//! Fails fast with an actionable message instead of a generic
//! "Transcript not available".

use crate::config::Settings;
use crate::error::{CueciteError, Result};
use std::process::Command;

/// Check that the configured caption tool can be executed.
pub fn check_caption_tool(settings: &Settings) -> Result<String> {
    check_tool(&settings.captions.tool)
}

/// Run `<name> --version` and return the first line of its output.
pub fn check_tool(name: &str) -> Result<String> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or("installed")
            .trim()
            .to_string()),
        Ok(_) => Err(CueciteError::ToolExecution(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(CueciteError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(CueciteError::ToolExecution(format!("{}: {}", name, e))),
    }
}
