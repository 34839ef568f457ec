//! Identity service: get-or-create for the conversation id.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use wrelay_types::error::IdentityError;
use wrelay_types::identity::StoredIdentity;

use super::new_conversation_id;

/// Storage port for the persisted identity.
pub trait IdentityStorage: Send + Sync {
    /// Load the stored identity, `None` if nothing was stored yet.
    fn load(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<StoredIdentity>, IdentityError>> + Send;

    /// Persist the identity, replacing any previous one.
    fn store(
        &self,
        identity: &StoredIdentity,
    ) -> impl std::future::Future<Output = Result<(), IdentityError>> + Send;
}

/// Hands out the conversation id for this client profile.
pub struct IdentityService<S: IdentityStorage> {
    storage: S,
    ttl: Option<Duration>,
}

impl<S: IdentityStorage> IdentityService<S> {
    /// `ttl = None` gives local-storage semantics (never expires).
    pub fn new(storage: S, ttl: Option<Duration>) -> Self {
        Self { storage, ttl }
    }

    /// Return the stored id while it is valid, otherwise create and persist one.
    ///
    /// Never fails: unreadable or unwritable storage yields a fresh id that is
    /// simply not persisted for this session.
    pub async fn get_or_create_conversation_id(&self) -> String {
        self.get_or_create_at(Utc::now()).await
    }

    /// Drop the current identity and persist a fresh one.
    pub async fn reset(&self) -> String {
        let identity = self.mint(Utc::now());
        self.persist(&identity).await;
        identity.conversation_id
    }

    async fn get_or_create_at(&self, now: DateTime<Utc>) -> String {
        match self.storage.load().await {
            Ok(Some(stored)) if stored.is_valid_at(now) => return stored.conversation_id,
            Ok(Some(_)) => debug!("Stored conversation id expired"),
            Ok(None) => {}
            Err(err) => warn!(error = %err, "Identity storage unreadable, minting a new id"),
        }

        let identity = self.mint(now);
        self.persist(&identity).await;
        identity.conversation_id
    }

    fn mint(&self, now: DateTime<Utc>) -> StoredIdentity {
        StoredIdentity {
            conversation_id: new_conversation_id(),
            created_at: now,
            expires_at: self.ttl.map(|ttl| now + ttl),
        }
    }

    async fn persist(&self, identity: &StoredIdentity) {
        if let Err(err) = self.storage.store(identity).await {
            warn!(error = %err, "Could not persist conversation id; using it for this session only");
        }
    }
}
