//! Application Configuration
//!
//! Process-wide settings for the session core, passed explicitly into
//! [`SessionStore`](crate::SessionStore) and
//! [`RuleRegistry`](crate::RuleRegistry) at construction.
//! Session file location: ~/.portward on macOS/Linux, %APPDATA%\Portward
//! on Windows.

use std::path::PathBuf;

/// Entries appended when no prior session exists
pub const DEFAULT_LINE_COUNT: usize = 5;

/// File name of the persisted session document
pub const SESSION_FILE_NAME: &str = "session.json";

/// The configuration directory could not be determined
#[derive(Debug, thiserror::Error)]
#[error("Failed to determine config directory")]
pub struct NoConfigDir;

/// Get the Portward configuration directory
/// Returns %APPDATA%\Portward on Windows, ~/.portward on macOS/Linux
pub fn config_dir() -> Result<PathBuf, NoConfigDir> {
    #[cfg(windows)]
    {
        // On Windows, prefer APPDATA for better compatibility
        if let Some(app_data) = dirs::config_dir() {
            return Ok(app_data.join("Portward"));
        }
        // Fallback to home directory
        dirs::home_dir()
            .map(|home| home.join(".portward"))
            .ok_or(NoConfigDir)
    }

    #[cfg(not(windows))]
    {
        dirs::home_dir()
            .map(|home| home.join(".portward"))
            .ok_or(NoConfigDir)
    }
}

/// Get the default session file path
pub fn session_file() -> Result<PathBuf, NoConfigDir> {
    Ok(config_dir()?.join(SESSION_FILE_NAME))
}

/// Settings consumed by the session components
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Fixed path of the persisted session document
    pub session_file: PathBuf,
    /// Entry count of a fresh default session
    pub default_line_count: usize,
}

impl AppConfig {
    /// Configuration with the default session file location
    pub fn new() -> Result<Self, NoConfigDir> {
        Ok(Self {
            session_file: session_file()?,
            default_line_count: DEFAULT_LINE_COUNT,
        })
    }

    /// Configuration with a custom session file path (for testing)
    pub fn with_session_file(path: impl Into<PathBuf>) -> Self {
        Self {
            session_file: path.into(),
            default_line_count: DEFAULT_LINE_COUNT,
        }
    }
}
