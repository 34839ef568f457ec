//! Client transports for talking to the relay.
//!
//! - [`http::HttpTransport`]: one request per message, reply in the response.
//! - [`ws::WsTransport`]: one long-lived WebSocket, replies pushed by the server.

pub mod http;
pub mod ws;
