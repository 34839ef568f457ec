//! Client transport abstraction.
//!
//! Both transport variants share one interface: `send` pushes the user's text
//! toward the relay, and replies arrive on the [`ReplyReceiver`] handed out
//! when the transport was built. For the request/response variant each
//! successful `send` produces exactly one reply on the channel; for the
//! streaming variant the channel yields whatever the server pushes and closes
//! with the connection. Neither variant retries or buffers undelivered text.

use tokio::sync::mpsc;

use wrelay_types::error::TransportError;

/// Receiving half for replies pushed by a transport.
pub type ReplyReceiver = mpsc::UnboundedReceiver<String>;

/// Sending half a transport uses to deliver replies.
pub type ReplySender = mpsc::UnboundedSender<String>;

/// Create the reply channel shared by a transport and its consumer.
pub fn reply_channel() -> (ReplySender, ReplyReceiver) {
    mpsc::unbounded_channel()
}

/// A way of getting user text to the relay.
pub trait ChatTransport: Send + Sync {
    /// Short name for logs ("http", "ws").
    fn name(&self) -> &str;

    /// Deliver one user message. Errors are returned to the caller as-is.
    fn send(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;
}
