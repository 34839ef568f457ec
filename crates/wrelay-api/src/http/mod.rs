//! HTTP layer for the relay.
//!
//! Axum routes for the widget (`/send-message`, `/messages`, `/identity`),
//! the streaming `/ws` transport, and permissive CORS.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
