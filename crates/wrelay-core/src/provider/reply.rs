//! ReplyProvider trait definition.

use wrelay_types::error::ProviderError;

/// What a provider answered.
///
/// `text` is `None` when the provider responded successfully but without any
/// usable text; the relay substitutes its fallback placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReply {
    pub text: Option<String>,
}

impl ProviderReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn empty() -> Self {
        Self { text: None }
    }
}

/// Trait for reply backends (downstream HTTP chat service, canned stub).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in wrelay-infra (e.g., `HttpChatProvider`).
pub trait ReplyProvider: Send + Sync {
    /// Human-readable provider name (e.g., "http", "canned").
    fn name(&self) -> &str;

    /// Produce a reply for `text`. One call, no retry.
    fn reply(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<ProviderReply, ProviderError>> + Send;
}
