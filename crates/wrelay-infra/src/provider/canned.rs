//! CannedReplyProvider -- answers with a uniformly random canned string.

use rand::seq::IndexedRandom;

use wrelay_core::provider::reply::{ProviderReply, ReplyProvider};
use wrelay_types::error::ProviderError;

/// Stub provider that never calls anything downstream.
pub struct CannedReplyProvider {
    replies: Vec<String>,
}

impl CannedReplyProvider {
    /// An empty list makes every reply empty, so the relay falls back.
    pub fn new(replies: Vec<String>) -> Self {
        Self { replies }
    }
}

impl ReplyProvider for CannedReplyProvider {
    fn name(&self) -> &str {
        "canned"
    }

    async fn reply(&self, _text: &str) -> Result<ProviderReply, ProviderError> {
        let choice = self.replies.choose(&mut rand::rng()).cloned();
        Ok(ProviderReply { text: choice })
    }
}
