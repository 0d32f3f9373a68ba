//! Path constants for the persisted preferences file.

use std::path::PathBuf;

/// The name of the configuration directory under ~/.config/
pub const CONFIG_DIR_NAME: &str = "verselay";

/// The name of the preferences file
pub const PREFS_FILE_NAME: &str = "prefs.json";

/// Get the configuration directory path (~/.config/verselay/)
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join(CONFIG_DIR_NAME)
}

/// Get the preferences file path (`~/.config/verselay/prefs.json`)
#[must_use]
pub fn prefs_path() -> PathBuf {
    config_dir().join(PREFS_FILE_NAME)
}
