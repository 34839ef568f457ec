//! Filesystem adapters for client-side state.
//!
//! The CLI client keeps what a browser would keep in cookies or local
//! storage as small JSON files in the data directory.

pub mod identity;
pub mod prefs;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use wrelay_types::error::IdentityError;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `WRELAY_DATA_DIR` environment variable
/// 2. `~/.wrelay`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("WRELAY_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".wrelay");
    }

    // Last resort: current directory
    PathBuf::from(".wrelay")
}

/// Read a JSON file, `None` when it does not exist.
async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, IdentityError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(IdentityError::Io(err.to_string())),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| IdentityError::Corrupt(format!("{}: {e}", path.display())))
}

/// Write a JSON file, creating parent directories.
async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), IdentityError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| IdentityError::Io(e.to_string()))?;
    }

    let content =
        serde_json::to_string_pretty(value).map_err(|e| IdentityError::Corrupt(e.to_string()))?;
    tokio::fs::write(path, content)
        .await
        .map_err(|e| IdentityError::Io(e.to_string()))
}
