// Settings service
// Loads and saves the grid settings as TOML in the platform config directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

use crate::models::settings::Settings;

const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine the config directory")]
    NoConfigDir,
    #[error("failed to read settings: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

fn default_path() -> Result<PathBuf, SettingsError> {
    let dirs = ProjectDirs::from("", "", "daygrid").ok_or(SettingsError::NoConfigDir)?;
    Ok(dirs.config_dir().join(SETTINGS_FILE))
}

/// Load settings from the platform config directory.
/// A missing file yields the defaults; a malformed one is an error.
pub fn load() -> Result<Settings, SettingsError> {
    load_from(&default_path()?)
}

pub fn load_from(path: &Path) -> Result<Settings, SettingsError> {
    if !path.exists() {
        log::info!("no settings file at {}, using defaults", path.display());
        return Ok(Settings::default());
    }
    let contents = fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&contents)?;
    settings.validate().map_err(SettingsError::Invalid)?;
    Ok(settings)
}

/// Save settings to the platform config directory
pub fn save(settings: &Settings) -> Result<(), SettingsError> {
    save_to(settings, &default_path()?)
}

pub fn save_to(settings: &Settings, path: &Path) -> Result<(), SettingsError> {
    settings
        .validate()
        .map_err(SettingsError::Invalid)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(settings)?;
    fs::write(path, contents)?;
    log::debug!("saved settings to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);
        let settings = Settings {
            min_hour: 7,
            snap_minutes: 10,
            ..Settings::default()
        };
        save_to(&settings, &path).unwrap();
        assert_eq!(load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "min_hour = \"nine\"").unwrap();
        assert!(matches!(load_from(&path), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_invalid_settings_rejected_on_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        let settings = Settings {
            snap_minutes: 0,
            ..Settings::default()
        };
        assert!(matches!(
            save_to(&settings, &path),
            Err(SettingsError::Invalid(_))
        ));
    }
}
