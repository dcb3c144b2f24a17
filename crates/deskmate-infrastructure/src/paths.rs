//! Unified path management for DeskMate configuration files.
//!
//! All DeskMate configuration lives under the platform config directory,
//! resolved via the `dirs` crate. This ensures consistency across all
//! platforms (Linux, macOS, Windows).

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for DeskMate.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/deskmate/          # Config directory
/// └── settings.json            # Assistant settings (including the API key)
/// ```
pub struct DeskmatePaths;

impl DeskmatePaths {
    /// Returns the DeskMate configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/deskmate/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("deskmate"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the settings file.
    ///
    /// # Security Note
    ///
    /// The settings record contains the API key, so the file is written with
    /// 600 permissions on Unix (see `SettingsStore::save`).
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to settings.json
    /// - `Err(PathError)`: Could not determine path
    pub fn settings_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("settings.json"))
    }
}
