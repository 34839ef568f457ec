//! Reply provider implementations.
//!
//! - [`http::HttpChatProvider`]: forwards text to the downstream chat service.
//! - [`canned::CannedReplyProvider`]: answers from a fixed list (stub mode).
//!
//! [`build_provider`] picks one from configuration.

pub mod canned;
pub mod http;

use wrelay_core::provider::box_provider::BoxReplyProvider;
use wrelay_types::config::{ProviderConfig, ProviderKind};
use wrelay_types::error::ProviderError;

/// Build the configured provider behind a type-erased box.
pub fn build_provider(config: &ProviderConfig) -> Result<BoxReplyProvider, ProviderError> {
    let provider = match config.kind {
        ProviderKind::Http => BoxReplyProvider::new(http::HttpChatProvider::from_config(config)?),
        ProviderKind::Canned => {
            BoxReplyProvider::new(canned::CannedReplyProvider::new(config.canned_replies.clone()))
        }
    };
    tracing::info!(provider = provider.name(), "Reply provider configured");
    Ok(provider)
}
