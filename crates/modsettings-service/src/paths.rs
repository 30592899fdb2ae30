//! Platform paths for the persisted settings record.

use std::path::PathBuf;

use modsettings_core::StorageError;

/// Directory name under the platform config directory.
const APP_DIR: &str = "modsettings";

/// File name of the persisted settings record.
const SETTINGS_FILE: &str = "settings.json";

/// Platform-specific settings file location, e.g.
/// `~/.config/modsettings/settings.json` on Linux.
pub fn settings_file_path() -> Result<PathBuf, StorageError> {
    let base = dirs::config_dir().ok_or_else(|| {
        StorageError::Directory("No config directory for this platform".to_string())
    })?;
    Ok(base.join(APP_DIR).join(SETTINGS_FILE))
}

/// Resolve the settings file path, creating its directory if needed.
pub fn ensure_settings_dir() -> Result<PathBuf, StorageError> {
    let path = settings_file_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| StorageError::Directory(format!("{}: {}", parent.display(), e)))?;
    }
    Ok(path)
}
