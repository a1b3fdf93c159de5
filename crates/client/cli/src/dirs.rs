//! Platform-specific directory utilities

use std::path::PathBuf;

/// Get the platform-specific log directory
///
/// - macOS: `~/Library/Caches/grimm/logs`
/// - Linux: `~/.cache/grimm/logs` (or `$XDG_CACHE_HOME/grimm/logs`)
/// - Windows: `%LOCALAPPDATA%\grimm\logs`
/// - Fallback: `/tmp/grimm/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "grimm")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/grimm"))
        .join("logs")
}

/// Get the platform-specific data directory
///
/// - macOS: `~/Library/Application Support/grimm`
/// - Linux: `~/.local/share/grimm` (or `$XDG_DATA_HOME/grimm`)
/// - Windows: `%APPDATA%\grimm`
/// - Fallback: `./grimm_data`
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "grimm")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./grimm_data"))
}
