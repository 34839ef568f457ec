//! Success response format.
//!
//! Every successful response carries `"success": true` next to its payload
//! fields:
//! ```json
//! { "success": true, "message": { ... } }
//! ```

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use wrelay_types::envelope::{Envelope, MessageView};

/// Wraps a payload struct whose fields are flattened next to `success`.
#[derive(Debug, Serialize)]
pub struct Success<T: Serialize> {
    success: bool,
    #[serde(flatten)]
    body: T,
}

impl<T: Serialize> Success<T> {
    pub fn new(body: T) -> Self {
        Self {
            success: true,
            body,
        }
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// `POST /send-message` payload.
#[derive(Debug, Serialize)]
pub struct QuickReplyBody {
    pub response: QuickReply,
}

#[derive(Debug, Serialize)]
pub struct QuickReply {
    pub message: String,
}

/// `POST /messages` payload.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: MessageView,
}

/// `GET /messages/{widgetId}` payload.
#[derive(Debug, Serialize)]
pub struct MessagesBody {
    pub messages: Vec<Envelope>,
}

/// `GET /identity` payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityBody {
    pub widget_id: String,
    pub created: bool,
}
