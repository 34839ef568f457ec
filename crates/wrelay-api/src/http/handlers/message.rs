//! Message relay HTTP handlers.
//!
//! Endpoints:
//! - POST /send-message          - Stateless reply, nothing stored
//! - POST /messages              - Store, forward, store reply, return reply
//! - GET  /messages/{widget_id}  - Stored transcript, oldest first

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde::Deserialize;

use wrelay_types::envelope::{IncomingMessage, MISSING_FIELDS, MessageView};

use crate::http::error::AppError;
use crate::http::response::{MessageBody, MessagesBody, QuickReply, QuickReplyBody, Success};
use crate::state::AppState;

const MESSAGE_REQUIRED: &str = "Message is required";

/// Body of `POST /send-message`.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// POST /send-message - Forward a bare message and return the reply text.
pub async fn send_message(
    State(state): State<AppState>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Success<QuickReplyBody>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::from_rejection(e, MESSAGE_REQUIRED))?;

    let reply = state
        .relay_service
        .quick_reply(request.message.as_deref())
        .await
        .map_err(|e| AppError::from_relay(e, "Error forwarding message"))?;

    Ok(Success::new(QuickReplyBody {
        response: QuickReply { message: reply },
    }))
}

/// POST /messages - Relay one conversation message.
pub async fn post_message(
    State(state): State<AppState>,
    payload: Result<Json<IncomingMessage>, JsonRejection>,
) -> Result<Success<MessageBody>, AppError> {
    let Json(incoming) = payload.map_err(|e| AppError::from_rejection(e, MISSING_FIELDS))?;

    let reply = state
        .relay_service
        .handle_incoming(incoming)
        .await
        .map_err(|e| AppError::from_relay(e, "Error processing message"))?;

    Ok(Success::new(MessageBody {
        message: MessageView::from(reply),
    }))
}

/// GET /messages/{widget_id} - List a conversation in timestamp order.
pub async fn get_messages(
    State(state): State<AppState>,
    Path(widget_id): Path<String>,
) -> Result<Success<MessagesBody>, AppError> {
    let messages = state
        .relay_service
        .list_by_conversation(&widget_id)
        .await
        .map_err(|e| AppError::from_relay(e, "Error fetching messages"))?;

    Ok(Success::new(MessagesBody { messages }))
}
