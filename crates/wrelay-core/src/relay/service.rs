//! Relay service: persist the inbound message, ask the provider, persist the reply.
//!
//! The steps are independent side effects. A failure in a later step never
//! undoes an earlier one: an inbound envelope without a reply is an accepted
//! outcome when the provider or the second write fails.

use chrono::Utc;
use tracing::{debug, info, warn};

use wrelay_types::envelope::{Envelope, IncomingMessage};
use wrelay_types::error::RelayError;

use crate::provider::box_provider::BoxReplyProvider;
use crate::provider::reply::ProviderReply;
use crate::repository::envelope::EnvelopeRepository;

/// Stateless relay between widget clients and the reply provider.
///
/// Generic over `EnvelopeRepository` so wrelay-core never depends on
/// wrelay-infra. Holds no per-request state; concurrent calls for the same
/// conversation may interleave.
pub struct RelayService<R: EnvelopeRepository> {
    repo: R,
    provider: BoxReplyProvider,
    fallback_text: String,
}

impl<R: EnvelopeRepository> RelayService<R> {
    pub fn new(repo: R, provider: BoxReplyProvider, fallback_text: impl Into<String>) -> Self {
        Self {
            repo,
            provider,
            fallback_text: fallback_text.into(),
        }
    }

    /// Access the envelope repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Name of the configured provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Handle one conversation-aware message and return the stored reply.
    pub async fn handle_incoming(&self, incoming: IncomingMessage) -> Result<Envelope, RelayError> {
        let inbound = incoming.into_envelope(Utc::now())?;

        self.repo.append(&inbound).await?;
        debug!(
            widget_id = %inbound.widget_id,
            message_id = %inbound.message_id,
            "Inbound message stored"
        );

        let reply = self.provider.reply(&inbound.text).await.map_err(|err| {
            warn!(
                widget_id = %inbound.widget_id,
                message_id = %inbound.message_id,
                provider = self.provider.name(),
                error = %err,
                "Provider failed; inbound message kept without reply"
            );
            RelayError::Upstream(err)
        })?;

        let reply = Envelope::bot_reply(&inbound.widget_id, self.reply_text(reply), Utc::now());
        self.repo.append(&reply).await?;
        info!(
            widget_id = %reply.widget_id,
            message_id = %reply.message_id,
            "Reply stored"
        );

        Ok(reply)
    }

    /// Produce a reply without touching the envelope log.
    ///
    /// Backs the stateless `/send-message` route and the WebSocket surface.
    pub async fn quick_reply(&self, text: Option<&str>) -> Result<String, RelayError> {
        let text = match text {
            Some(t) if !t.is_empty() => t,
            _ => return Err(RelayError::Validation("Message is required".to_string())),
        };

        let reply = self.provider.reply(text).await.map_err(|err| {
            warn!(provider = self.provider.name(), error = %err, "Provider failed");
            RelayError::Upstream(err)
        })?;

        Ok(self.reply_text(reply))
    }

    /// The transcript of a conversation, ascending by timestamp.
    pub async fn list_by_conversation(&self, widget_id: &str) -> Result<Vec<Envelope>, RelayError> {
        if widget_id.is_empty() {
            return Err(RelayError::Validation("widgetId is required".to_string()));
        }
        Ok(self.repo.list_by_conversation(widget_id).await?)
    }

    fn reply_text(&self, reply: ProviderReply) -> String {
        reply
            .text
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| self.fallback_text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use wrelay_types::envelope::Sender;
    use wrelay_types::error::{ProviderError, RepositoryError};

    use crate::provider::reply::ReplyProvider;

    // --- Mocks ---

    /// In-memory envelope log. `fail_after` makes every append past that
    /// many stored envelopes fail.
    #[derive(Default)]
    struct MockRepository {
        envelopes: Mutex<Vec<Envelope>>,
        fail_after: Option<usize>,
    }

    impl EnvelopeRepository for MockRepository {
        async fn append(&self, envelope: &Envelope) -> Result<(), RepositoryError> {
            let mut envelopes = self.envelopes.lock().unwrap();
            if self.fail_after.is_some_and(|n| envelopes.len() >= n) {
                return Err(RepositoryError::Connection);
            }
            envelopes.push(envelope.clone());
            Ok(())
        }

        async fn list_by_conversation(
            &self,
            widget_id: &str,
        ) -> Result<Vec<Envelope>, RepositoryError> {
            let mut found: Vec<Envelope> = self
                .envelopes
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.widget_id == widget_id)
                .cloned()
                .collect();
            found.sort_by_key(|e| e.timestamp);
            Ok(found)
        }

        async fn count_by_conversation(&self, widget_id: &str) -> Result<u64, RepositoryError> {
            Ok(self.list_by_conversation(widget_id).await?.len() as u64)
        }
    }

    /// A provider that answers with a fixed reply or a fixed failure.
    struct MockProvider {
        reply: Option<String>,
        fail: bool,
    }

    impl ReplyProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn reply(&self, _text: &str) -> Result<ProviderReply, ProviderError> {
            if self.fail {
                return Err(ProviderError::Status(503));
            }
            Ok(ProviderReply {
                text: self.reply.clone(),
            })
        }
    }

    fn service_with(reply: Option<&str>, fail: bool) -> RelayService<MockRepository> {
        service_with_repo(MockRepository::default(), reply, fail)
    }

    fn service_with_repo(
        repo: MockRepository,
        reply: Option<&str>,
        fail: bool,
    ) -> RelayService<MockRepository> {
        let provider = MockProvider {
            reply: reply.map(str::to_string),
            fail,
        };
        RelayService::new(repo, BoxReplyProvider::new(provider), "Brak odpowiedzi")
    }

    fn incoming(message_id: &str, text: &str) -> IncomingMessage {
        IncomingMessage {
            widget_id: Some("w1".to_string()),
            message_id: Some(message_id.to_string()),
            text: Some(text.to_string()),
            sender: Some("user".to_string()),
        }
    }

    // --- handle_incoming ---

    #[tokio::test]
    async fn test_reply_is_returned_and_both_envelopes_stored() {
        let service = service_with(Some("hi there"), false);

        let reply = service.handle_incoming(incoming("m1", "hello")).await.unwrap();
        assert_eq!(reply.widget_id, "w1");
        assert_eq!(reply.text, "hi there");
        assert_eq!(reply.sender, Sender::Bot);
        assert_ne!(reply.message_id, "m1");

        let transcript = service.list_by_conversation("w1").await.unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].message_id, "m1");
        assert_eq!(transcript[0].sender, Sender::User);
        assert_eq!(transcript[1].message_id, reply.message_id);
        assert!(transcript[0].timestamp <= transcript[1].timestamp);
    }

    #[tokio::test]
    async fn test_missing_text_persists_nothing() {
        let service = service_with(Some("hi there"), false);
        let mut msg = incoming("m2", "");
        msg.sender = None;

        let err = service.handle_incoming(msg).await.unwrap_err();
        assert!(matches!(err, RelayError::Validation(_)));
        assert_eq!(service.repo().count_by_conversation("w1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_keeps_inbound_only() {
        let service = service_with(None, true);

        let err = service.handle_incoming(incoming("m1", "hello")).await.unwrap_err();
        assert!(matches!(err, RelayError::Upstream(ProviderError::Status(503))));

        let transcript = service.list_by_conversation("w1").await.unwrap();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].message_id, "m1");
    }

    #[tokio::test]
    async fn test_empty_provider_text_uses_fallback() {
        let service = service_with(Some("   "), false);
        let reply = service.handle_incoming(incoming("m1", "hello")).await.unwrap();
        assert_eq!(reply.text, "Brak odpowiedzi");

        let service = service_with(None, false);
        let reply = service.handle_incoming(incoming("m1", "hello")).await.unwrap();
        assert_eq!(reply.text, "Brak odpowiedzi");
    }

    #[tokio::test]
    async fn test_duplicate_message_id_is_stored_twice() {
        let service = service_with(Some("ok"), false);
        service.handle_incoming(incoming("m1", "hello")).await.unwrap();
        service.handle_incoming(incoming("m1", "hello")).await.unwrap();
        assert_eq!(service.repo().count_by_conversation("w1").await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_reply_write_failure_keeps_inbound() {
        let repo = MockRepository {
            fail_after: Some(1),
            ..Default::default()
        };
        let service = service_with_repo(repo, Some("hi"), false);

        let err = service.handle_incoming(incoming("m1", "hello")).await.unwrap_err();
        assert!(matches!(err, RelayError::Persistence(_)));
        assert_eq!(service.repo().count_by_conversation("w1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_inbound_write_failure_skips_provider() {
        let repo = MockRepository {
            fail_after: Some(0),
            ..Default::default()
        };
        let service = service_with_repo(repo, None, true);

        // The provider would fail with Upstream; a Persistence error proves it was never called.
        let err = service.handle_incoming(incoming("m1", "hello")).await.unwrap_err();
        assert!(matches!(err, RelayError::Persistence(_)));
    }

    // --- quick_reply ---

    #[tokio::test]
    async fn test_quick_reply_does_not_persist() {
        let service = service_with(Some("pong"), false);
        assert_eq!(service.quick_reply(Some("ping")).await.unwrap(), "pong");
        assert_eq!(service.repo().count_by_conversation("w1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_quick_reply_requires_text() {
        let service = service_with(Some("pong"), false);
        assert!(matches!(
            service.quick_reply(None).await,
            Err(RelayError::Validation(_))
        ));
        assert!(matches!(
            service.quick_reply(Some("")).await,
            Err(RelayError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_quick_reply_surfaces_provider_failure() {
        let service = service_with(None, true);
        assert!(matches!(
            service.quick_reply(Some("ping")).await,
            Err(RelayError::Upstream(_))
        ));
    }

    #[tokio::test]
    async fn test_list_requires_widget_id() {
        let service = service_with(Some("ok"), false);
        assert!(matches!(
            service.list_by_conversation("").await,
            Err(RelayError::Validation(_))
        ));
    }
}
