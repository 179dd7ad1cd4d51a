//! User settings for Memoroa

use serde::{Deserialize, Serialize};

use super::paths::MemoroaPaths;
use crate::error::MemoroaError;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Filename stem suggested for new backup files
    #[serde(default = "default_backup_stem")]
    pub backup_filename_stem: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_backup_stem() -> String {
    "memoroa".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            backup_filename_stem: default_backup_stem(),
        }
    }
}

impl Settings {
    /// Load settings from disk, writing the defaults on first run
    pub fn load_or_create(paths: &MemoroaPaths) -> Result<Self, MemoroaError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| MemoroaError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| MemoroaError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            // Persist the defaults so the file exists for hand-editing
            let settings = Settings::default();
            settings.save(paths)?;
            Ok(settings)
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MemoroaPaths) -> Result<(), MemoroaError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| MemoroaError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| MemoroaError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.backup_filename_stem, "memoroa");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MemoroaPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.backup_filename_stem = "my-notes".to_string();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.backup_filename_stem, "my-notes");
    }

    #[test]
    fn test_load_missing_creates_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MemoroaPaths::with_base_dir(temp_dir.path().to_path_buf());

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.backup_filename_stem, "memoroa");

        // First run persists the defaults for hand-editing
        assert!(paths.settings_file().exists());
        let reloaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(reloaded.backup_filename_stem, "memoroa");
    }
}
