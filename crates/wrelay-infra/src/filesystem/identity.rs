//! File-backed identity storage (the CLI's equivalent of browser storage).

use std::path::{Path, PathBuf};

use wrelay_core::identity::service::IdentityStorage;
use wrelay_types::error::IdentityError;
use wrelay_types::identity::StoredIdentity;

use super::{read_json, write_json};

/// Stores the conversation identity at `{data_dir}/identity.json`.
pub struct FileIdentityStorage {
    path: PathBuf,
}

impl FileIdentityStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Storage at the default location inside `data_dir`.
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("identity.json"))
    }
}

impl IdentityStorage for FileIdentityStorage {
    async fn load(&self) -> Result<Option<StoredIdentity>, IdentityError> {
        read_json(&self.path).await
    }

    async fn store(&self, identity: &StoredIdentity) -> Result<(), IdentityError> {
        write_json(&self.path, identity).await
    }
}
