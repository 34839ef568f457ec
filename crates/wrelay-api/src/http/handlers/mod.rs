//! HTTP and WebSocket request handlers.

pub mod identity;
pub mod message;
pub mod ws;
