//! Infrastructure layer for the widget relay.
//!
//! Contains implementations of the ports defined in `wrelay-core`: the SQLite
//! envelope log, the downstream HTTP and canned reply providers, file-backed
//! client state, the config loader, and the HTTP/WebSocket client transports.

pub mod config;
pub mod filesystem;
pub mod provider;
pub mod sqlite;
pub mod transport;
