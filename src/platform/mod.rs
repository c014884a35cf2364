// Platform paths
// Config and data directories for Linux, macOS and Windows, selected with
// `cfg(target_os)` at compile time.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "extbookmarks";
const APP_DIR_TITLE: &str = "ExtBookmarks";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "EXTBOOKMARKS_DATA_DIR";

fn home_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    let home = env::var("USERPROFILE").unwrap_or_else(|_| String::from("C:\\Users\\Default"));
    #[cfg(not(target_os = "windows"))]
    let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
    PathBuf::from(home)
}

/// Configuration directory.
///
/// - **Linux**: `$XDG_CONFIG_HOME/extbookmarks` or `~/.config/extbookmarks`
/// - **macOS**: `~/Library/Application Support/ExtBookmarks`
/// - **Windows**: `%APPDATA%/ExtBookmarks`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join(APP_DIR_TITLE)
    }
    #[cfg(target_os = "windows")]
    {
        match env::var("APPDATA") {
            Ok(appdata) => PathBuf::from(appdata).join(APP_DIR_TITLE),
            Err(_) => home_dir().join("AppData").join("Roaming").join(APP_DIR_TITLE),
        }
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) => PathBuf::from(xdg).join(APP_DIR),
            Err(_) => home_dir().join(".config").join(APP_DIR),
        }
    }
}

/// Data directory holding the collection database.
///
/// `EXTBOOKMARKS_DATA_DIR` wins when set. Otherwise:
/// - **Linux**: `$XDG_DATA_HOME/extbookmarks` or `~/.local/share/extbookmarks`
/// - **macOS**: `~/Library/Application Support/ExtBookmarks`
/// - **Windows**: `%APPDATA%/ExtBookmarks`
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    #[cfg(any(target_os = "macos", target_os = "windows"))]
    {
        get_config_dir()
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        match env::var("XDG_DATA_HOME") {
            Ok(xdg) => PathBuf::from(xdg).join(APP_DIR),
            Err(_) => home_dir().join(".local").join("share").join(APP_DIR),
        }
    }
}
