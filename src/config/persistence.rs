//! Configuration file persistence for tabclip
//!
//! This module handles loading and saving the settings file in the
//! platform-specific config directory, with graceful fallback to defaults.

use crate::config::Settings;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "tabclip";

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Temporary file name used during atomic writes
const CONFIG_BACKUP_NAME: &str = "config.json.bak";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the application.
///
/// - **Windows**: `%APPDATA%\tabclip\`
/// - **macOS**: `~/Library/Application Support/tabclip/`
/// - **Linux**: `~/.config/tabclip/`
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the config directory cannot be determined
/// (e.g., if the HOME environment variable is not set).
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the configuration file.
pub fn get_config_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

// ─────────────────────────────────────────────────────────────────────────────
// Load Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Load configuration from the default config file location.
///
/// A missing, empty, or corrupted file yields default settings; the
/// corrupted case is logged as a warning.
pub fn load_config() -> Settings {
    get_config_file_path()
        .and_then(|path| load_config_from(&path))
        .unwrap_or_warn_default(Settings::default(), "Failed to load configuration")
}

/// Load and sanitize settings from a specific file.
pub fn load_config_from(config_path: &Path) -> Result<Settings> {
    if !config_path.exists() {
        debug!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        return Ok(Settings::default());
    }

    debug!("Loading config from: {}", config_path.display());

    let contents = fs::read_to_string(config_path).map_err(|e| Error::ConfigLoad {
        path: config_path.to_path_buf(),
        source: Box::new(e),
    })?;

    if contents.trim().is_empty() {
        debug!("Config file is empty, using defaults");
        return Ok(Settings::default());
    }

    let settings = Settings::from_json_sanitized(&contents).map_err(|e| {
        warn!(
            "Config file at {} contains invalid JSON: {}",
            config_path.display(),
            e
        );
        Error::ConfigParse {
            message: format!("Failed to parse config file: {}", e),
            source: Some(Box::new(e)),
        }
    })?;

    info!("Configuration loaded from {}", config_path.display());
    Ok(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Save Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Save configuration to the default config file location.
///
/// # Errors
///
/// - `Error::ConfigDirNotFound`: Config directory cannot be determined
/// - `Error::ConfigSave`: Failed to write the config file
pub fn save_config(settings: &Settings) -> Result<PathBuf> {
    let config_path = get_config_file_path()?;
    save_config_to(&config_path, settings)?;
    Ok(config_path)
}

/// Save settings to a specific file.
///
/// Writes to a temporary sibling first and renames it over the target, so
/// the file is never left half-written.
pub fn save_config_to(config_path: &Path, settings: &Settings) -> Result<()> {
    let config_dir = config_path
        .parent()
        .ok_or(Error::ConfigDirNotFound)?
        .to_path_buf();
    let backup_path = config_dir.join(CONFIG_BACKUP_NAME);

    if !config_dir.exists() {
        debug!("Creating config directory: {}", config_dir.display());
        fs::create_dir_all(&config_dir).map_err(|e| Error::ConfigSave {
            path: config_dir.clone(),
            source: Box::new(e),
        })?;
    }

    let json = serde_json::to_string_pretty(settings).map_err(|e| Error::ConfigSave {
        path: config_path.to_path_buf(),
        source: Box::new(e),
    })?;

    fs::write(&backup_path, &json).map_err(|e| Error::ConfigSave {
        path: backup_path.clone(),
        source: Box::new(e),
    })?;

    fs::rename(&backup_path, config_path).map_err(|e| Error::ConfigSave {
        path: config_path.to_path_buf(),
        source: Box::new(e),
    })?;

    info!("Configuration saved to {}", config_path.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::CellEscaping;
    use tempfile::TempDir;

    fn config_path(dir: &TempDir) -> PathBuf {
        dir.path().join(APP_NAME).join(CONFIG_FILE_NAME)
    }

    #[test]
    fn test_get_config_file_path() {
        // Only meaningful where a config dir exists (not on bare CI containers)
        if let Ok(path) = get_config_file_path() {
            assert!(path.ends_with(Path::new(APP_NAME).join(CONFIG_FILE_NAME)));
        }
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = load_config_from(&config_path(&dir)).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = config_path(&dir);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "  \n").unwrap();

        assert_eq!(load_config_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_corrupted_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = config_path(&dir);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ invalid json }").unwrap();

        let result = load_config_from(&path);
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
        assert_eq!(
            result.unwrap_or_warn_default(Settings::default(), "test"),
            Settings::default()
        );
    }

    #[test]
    fn test_save_creates_directory_and_roundtrips() {
        let dir = TempDir::new().unwrap();
        let path = config_path(&dir);
        let original = Settings {
            cell_escaping: CellEscaping::Gfm,
            json_element_id: "payload".to_string(),
            linger_ms: 500,
            ..Settings::default()
        };

        save_config_to(&path, &original).unwrap();

        assert!(path.exists());
        assert!(!path.with_file_name(CONFIG_BACKUP_NAME).exists());
        assert_eq!(load_config_from(&path).unwrap(), original);
    }

    #[test]
    fn test_load_sanitizes_values() {
        let dir = TempDir::new().unwrap();
        let path = config_path(&dir);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"linger_ms": 999999}"#).unwrap();

        let settings = load_config_from(&path).unwrap();
        assert_eq!(settings.linger_ms, Settings::MAX_LINGER_MS);
    }

    #[test]
    fn test_load_config_graceful_fallback() {
        // Always returns usable settings, whatever is on this machine
        let settings = load_config();
        assert!(!settings.json_element_id.is_empty());
    }
}
