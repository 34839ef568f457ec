//! BoxReplyProvider -- object-safe dynamic dispatch wrapper for ReplyProvider.
//!
//! 1. Define an object-safe `ReplyProviderDyn` trait with boxed futures
//! 2. Blanket-impl `ReplyProviderDyn` for all `T: ReplyProvider`
//! 3. `BoxReplyProvider` wraps `Box<dyn ReplyProviderDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use wrelay_types::error::ProviderError;

use super::reply::{ProviderReply, ReplyProvider};

/// Object-safe version of [`ReplyProvider`] with boxed futures.
pub trait ReplyProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn reply_boxed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ProviderReply, ProviderError>> + Send + 'a>>;
}

impl<T: ReplyProvider> ReplyProviderDyn for T {
    fn name(&self) -> &str {
        ReplyProvider::name(self)
    }

    fn reply_boxed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ProviderReply, ProviderError>> + Send + 'a>> {
        Box::pin(self.reply(text))
    }
}

/// Type-erased reply provider, selected at runtime from configuration.
///
/// Since `ReplyProvider` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxReplyProvider` delegates to the inner `ReplyProviderDyn`.
pub struct BoxReplyProvider {
    inner: Box<dyn ReplyProviderDyn + Send + Sync>,
}

impl BoxReplyProvider {
    /// Wrap a concrete `ReplyProvider` in a type-erased box.
    pub fn new<T: ReplyProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn reply(&self, text: &str) -> Result<ProviderReply, ProviderError> {
        self.inner.reply_boxed(text).await
    }
}
