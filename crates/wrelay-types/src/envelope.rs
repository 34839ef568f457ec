//! Message envelope types for the widget relay.
//!
//! An [`Envelope`] is one stored chat message. A conversation has no record of
//! its own: it is the set of envelopes sharing a `widget_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::error::RelayError;

/// Message shown to callers when a required envelope field is absent or empty.
pub const MISSING_FIELDS: &str = "Missing fields in request body";

/// Who authored a message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (sender IN ('user', 'bot'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// One stored message record.
///
/// Serialized with the wire names the widget uses (`widgetId`, `messageId`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Opaque conversation identifier, never empty.
    pub widget_id: String,
    /// Opaque message identifier. Not deduplicated by the store.
    pub message_id: String,
    /// Message body, never empty.
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Envelope {
    /// Build a bot reply for a conversation with a freshly minted message id.
    pub fn bot_reply(widget_id: &str, text: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            widget_id: widget_id.to_string(),
            message_id: Uuid::now_v7().to_string(),
            text,
            sender: Sender::Bot,
            timestamp,
        }
    }
}

/// An inbound message as submitted by a client, before validation.
///
/// Every field is optional so that missing and empty values can be reported
/// as a validation failure instead of a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingMessage {
    #[serde(default)]
    pub widget_id: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
}

impl IncomingMessage {
    /// Validate every field and stamp the envelope with `timestamp`.
    pub fn into_envelope(self, timestamp: DateTime<Utc>) -> Result<Envelope, RelayError> {
        let widget_id = required(self.widget_id)?;
        let message_id = required(self.message_id)?;
        let text = required(self.text)?;
        let sender = required(self.sender)?
            .parse::<Sender>()
            .map_err(RelayError::Validation)?;

        Ok(Envelope {
            widget_id,
            message_id,
            text,
            sender,
            timestamp,
        })
    }
}

fn required(field: Option<String>) -> Result<String, RelayError> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RelayError::Validation(MISSING_FIELDS.to_string())),
    }
}

/// The reply body returned by the conversation-aware route.
///
/// Same as [`Envelope`] minus the timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub widget_id: String,
    pub message_id: String,
    pub text: String,
    pub sender: Sender,
}

impl From<Envelope> for MessageView {
    fn from(envelope: Envelope) -> Self {
        Self {
            widget_id: envelope.widget_id,
            message_id: envelope.message_id,
            text: envelope.text,
            sender: envelope.sender,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incoming(text: Option<&str>) -> IncomingMessage {
        IncomingMessage {
            widget_id: Some("w1".to_string()),
            message_id: Some("m1".to_string()),
            text: text.map(str::to_string),
            sender: Some("user".to_string()),
        }
    }

    #[test]
    fn test_sender_roundtrip() {
        for sender in [Sender::User, Sender::Bot] {
            let parsed: Sender = sender.to_string().parse().unwrap();
            assert_eq!(parsed, sender);
        }
        assert!("server".parse::<Sender>().is_err());
    }

    #[test]
    fn test_envelope_uses_wire_names() {
        let envelope = incoming(Some("hello")).into_envelope(Utc::now()).unwrap();
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["widgetId"], "w1");
        assert_eq!(json["messageId"], "m1");
        assert_eq!(json["sender"], "user");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_missing_text_is_rejected() {
        let err = incoming(None).into_envelope(Utc::now()).unwrap_err();
        assert_eq!(err.to_string(), format!("validation error: {MISSING_FIELDS}"));
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let err = incoming(Some("")).into_envelope(Utc::now()).unwrap_err();
        assert!(matches!(err, RelayError::Validation(_)));
    }

    #[test]
    fn test_unknown_sender_is_rejected() {
        let mut msg = incoming(Some("hello"));
        msg.sender = Some("admin".to_string());
        assert!(matches!(
            msg.into_envelope(Utc::now()),
            Err(RelayError::Validation(_))
        ));
    }

    #[test]
    fn test_incoming_deserializes_partial_body() {
        let msg: IncomingMessage =
            serde_json::from_str(r#"{"widgetId":"w1","messageId":"m2","text":""}"#).unwrap();
        assert_eq!(msg.widget_id.as_deref(), Some("w1"));
        assert!(msg.sender.is_none());
    }

    #[test]
    fn test_bot_reply_gets_fresh_message_id() {
        let now = Utc::now();
        let a = Envelope::bot_reply("w1", "hi".to_string(), now);
        let b = Envelope::bot_reply("w1", "hi".to_string(), now);
        assert_eq!(a.sender, Sender::Bot);
        assert_ne!(a.message_id, b.message_id);
    }

    #[test]
    fn test_message_view_drops_timestamp() {
        let view = MessageView::from(Envelope::bot_reply("w1", "hi there".to_string(), Utc::now()));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["sender"], "bot");
        assert_eq!(json["text"], "hi there");
        assert!(json.get("timestamp").is_none());
    }
}
