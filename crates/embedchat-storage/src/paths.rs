use std::path::PathBuf;

use embedchat_common::StorageError;

pub(crate) const APP_NAME: &str = "embedchat";

/// Returns the platform-specific data directory.
///
/// - macOS: `~/Library/Application Support/embedchat`
/// - Linux: `$XDG_DATA_HOME/embedchat` (defaults to `~/.local/share/embedchat`)
/// - Windows: `%APPDATA%\embedchat`
pub fn data_dir() -> Result<PathBuf, StorageError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| StorageError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// Directory holding one JSON file per storage namespace.
///
/// Located at `data_dir()/store`.
pub fn store_dir() -> Result<PathBuf, StorageError> {
    Ok(data_dir()?.join("store"))
}
