//! Persistent storage for the assistant settings record.
//!
//! The record is a single flat JSON file. It is read once at startup and
//! overwritten wholesale on every update; there is no partial write path
//! and no migration layer.

use std::fs;
use std::path::{Path, PathBuf};

use deskmate_core::error::{DeskmateError, Result};
use deskmate_core::settings::{Settings, SettingsPatch};

use crate::paths::DeskmatePaths;

/// File-backed store for [`Settings`].
pub struct SettingsStore {
    settings_path: PathBuf,
}

impl SettingsStore {
    /// Creates a store rooted at the platform config directory
    /// (`~/.config/deskmate/settings.json` on Linux).
    pub fn new() -> Result<Self> {
        let settings_path = DeskmatePaths::settings_file()
            .map_err(|e| DeskmateError::config(e.to_string()))?;
        Ok(Self { settings_path })
    }

    /// Creates a store reading and writing `settings.json` under `base_dir`.
    ///
    /// Used by tests and by hosts that relocate their config root.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: base_dir.into().join("settings.json"),
        }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.settings_path
    }

    /// Loads the settings record.
    ///
    /// A missing file is not an error: defaults are written to disk and
    /// returned, so first launch leaves an editable file behind. An existing
    /// but empty file also yields defaults (without rewriting it).
    ///
    /// # Errors
    ///
    /// - `Io` when the file exists but cannot be read
    /// - `Serialization` when the file exists but is not valid JSON
    pub fn load(&self) -> Result<Settings> {
        if !self.settings_path.exists() {
            tracing::info!(
                "[Settings] No settings file at {:?}, creating defaults",
                self.settings_path
            );
            let defaults = Settings::default();
            self.save(&defaults)?;
            return Ok(defaults);
        }

        let content = fs::read_to_string(&self.settings_path)?;
        if content.trim().is_empty() {
            return Ok(Settings::default());
        }

        let settings: Settings = serde_json::from_str(&content)?;
        tracing::debug!("[Settings] Loaded settings from {:?}", self.settings_path);
        Ok(settings)
    }

    /// Overwrites the record wholesale.
    ///
    /// The parent directory is created if needed. On Unix the file is set to
    /// 600 (user read/write only) because the record contains the API key.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.settings_path, json)?;

        // Set file permissions to 600 (user read/write only) on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.settings_path, permissions)?;
        }

        Ok(())
    }

    /// Loads the record, merges `patch` into it, and saves the result.
    ///
    /// Returns the updated record.
    pub fn update(&self, patch: SettingsPatch) -> Result<Settings> {
        let mut settings = self.load()?;
        settings.apply(patch);
        self.save(&settings)?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_on_missing_file_materializes_defaults() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::with_base_dir(dir.path());

        let settings = store.load().unwrap();
        assert_eq!(settings, Settings::default());
        assert!(store.path().exists());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::with_base_dir(dir.path());

        let mut settings = Settings::default();
        settings.api_key = Some("sk-test".to_string());
        settings.model_name = "gpt-4".to_string();
        store.save(&settings).unwrap();

        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn save_overwrites_wholesale() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::with_base_dir(dir.path());

        let mut custom = Settings::default();
        custom.api_key = Some("sk-old".to_string());
        custom.temperature = 0.1;
        store.save(&custom).unwrap();

        store.save(&Settings::default()).unwrap();
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn update_persists_patched_fields() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::with_base_dir(dir.path());

        let updated = store
            .update(SettingsPatch {
                model_name: Some("gpt-4".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.model_name, "gpt-4");

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.model_name, "gpt-4");
        assert_eq!(reloaded.temperature, Settings::default().temperature);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::with_base_dir(dir.path());
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(store.path(), "  \n").unwrap();

        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::with_base_dir(dir.path());
        fs::write(store.path(), "{ not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(err.is_serialization());
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_user_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let store = SettingsStore::with_base_dir(dir.path());
        store.save(&Settings::default()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
