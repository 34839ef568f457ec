//! Request/response transport over the relay's HTTP routes.

use serde::Deserialize;
use serde_json::json;

use wrelay_core::transport::{ChatTransport, ReplyReceiver, ReplySender, reply_channel};
use wrelay_types::envelope::{Envelope, MessageView, Sender};
use wrelay_types::error::TransportError;

#[derive(Deserialize)]
struct SendMessageResponse {
    response: QuickReply,
}

#[derive(Deserialize)]
struct QuickReply {
    message: String,
}

#[derive(Deserialize)]
struct PostMessageResponse {
    message: MessageView,
}

#[derive(Deserialize)]
struct HistoryResponse {
    messages: Vec<Envelope>,
}

/// HTTP client for the relay.
///
/// With a widget id, `send` goes through the conversation-aware
/// `POST /messages` route; without one it uses the stateless
/// `POST /send-message` route.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    widget_id: Option<String>,
    replies: ReplySender,
}

impl HttpTransport {
    pub fn new(
        base_url: impl Into<String>,
        widget_id: Option<String>,
    ) -> Result<(Self, ReplyReceiver), TransportError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Connect(e.to_string()))?;
        let (replies, rx) = reply_channel();

        let transport = Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            widget_id,
            replies,
        };
        Ok((transport, rx))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /send-message` and return the reply text.
    pub async fn send_plain(&self, text: &str) -> Result<String, TransportError> {
        let response = self
            .client
            .post(self.url("/send-message"))
            .json(&json!({ "message": text }))
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let body: SendMessageResponse = decode(response).await?;
        Ok(body.response.message)
    }

    /// `POST /messages` with a fresh message id and return the stored reply.
    pub async fn send_envelope(
        &self,
        widget_id: &str,
        text: &str,
    ) -> Result<MessageView, TransportError> {
        let message_id = uuid::Uuid::now_v7().to_string();
        let response = self
            .client
            .post(self.url("/messages"))
            .json(&json!({
                "widgetId": widget_id,
                "messageId": message_id,
                "text": text,
                "sender": Sender::User,
            }))
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let body: PostMessageResponse = decode(response).await?;
        Ok(body.message)
    }

    /// `GET /messages/{widget_id}`: the stored transcript, oldest first.
    pub async fn history(&self, widget_id: &str) -> Result<Vec<Envelope>, TransportError> {
        let mut url = reqwest::Url::parse(&self.url("/messages"))
            .map_err(|e| TransportError::Request(e.to_string()))?;
        // Percent-encodes the id as a single path segment.
        url.path_segments_mut()
            .map_err(|_| TransportError::Request(format!("not a base URL: {}", self.base_url)))?
            .push(widget_id);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let body: HistoryResponse = decode(response).await?;
        Ok(body.messages)
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, TransportError> {
    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::Status(status.as_u16()));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| TransportError::Decode(e.to_string()))
}

impl ChatTransport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(&self, text: &str) -> Result<(), TransportError> {
        let reply = match &self.widget_id {
            Some(widget_id) => self.send_envelope(widget_id, text).await?.text,
            None => self.send_plain(text).await?,
        };
        // The consumer may have gone away; nothing to deliver to then.
        let _ = self.replies.send(reply);
        Ok(())
    }
}
