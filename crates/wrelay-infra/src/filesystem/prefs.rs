//! Widget presentation preferences (open/closed flag).

use std::path::{Path, PathBuf};

use wrelay_types::error::IdentityError;
use wrelay_types::identity::WidgetPrefs;

use super::{read_json, write_json};

/// Stores [`WidgetPrefs`] at `{data_dir}/widget.json`.
pub struct WidgetPrefsStore {
    path: PathBuf,
}

impl WidgetPrefsStore {
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("widget.json"),
        }
    }

    /// Current preferences; defaults (closed) when nothing is stored.
    pub async fn load(&self) -> Result<WidgetPrefs, IdentityError> {
        Ok(read_json(&self.path).await?.unwrap_or_default())
    }

    /// Flip the open flag and persist it. Returns the new state.
    pub async fn toggle(&self) -> Result<WidgetPrefs, IdentityError> {
        let mut prefs = self.load().await?;
        prefs.widget_open = !prefs.widget_open;
        write_json(&self.path, &prefs).await?;
        Ok(prefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_default_is_closed() {
        let dir = tempdir().unwrap();
        let store = WidgetPrefsStore::in_data_dir(dir.path());
        assert!(!store.load().await.unwrap().widget_open);
    }

    #[tokio::test]
    async fn test_toggle_persists() {
        let dir = tempdir().unwrap();
        let store = WidgetPrefsStore::in_data_dir(dir.path());

        assert!(store.toggle().await.unwrap().widget_open);
        assert!(WidgetPrefsStore::in_data_dir(dir.path()).load().await.unwrap().widget_open);
        assert!(!store.toggle().await.unwrap().widget_open);
    }
}
