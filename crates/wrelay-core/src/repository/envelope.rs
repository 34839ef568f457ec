//! Envelope log repository trait definition.
//!
//! The log is append-only: no update or delete operation is exposed.

use wrelay_types::envelope::Envelope;
use wrelay_types::error::RepositoryError;

/// Repository trait for the append-only envelope log.
///
/// Implementations live in wrelay-infra (e.g., `SqliteEnvelopeRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait EnvelopeRepository: Send + Sync {
    /// Append one envelope. Does not enforce `message_id` uniqueness.
    fn append(
        &self,
        envelope: &Envelope,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// All envelopes of a conversation, ascending by timestamp.
    ///
    /// Envelopes with equal timestamps come back in insertion order.
    fn list_by_conversation(
        &self,
        widget_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Envelope>, RepositoryError>> + Send;

    /// Number of envelopes stored for a conversation.
    fn count_by_conversation(
        &self,
        widget_id: &str,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
