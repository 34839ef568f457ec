//! Conversation identity: one opaque id per client profile.
//!
//! `IdentityStorage` is the port a client-side store implements (a file, a
//! cookie jar); `IdentityService` adds creation, expiry, and the silent
//! fallback when storage is unavailable.

pub mod service;

use chrono::Duration;
use uuid::Uuid;

/// Cookie name carrying the conversation id.
pub const COOKIE_NAME: &str = "widgetId";

/// Lifetime of a cookie-backed identity, in seconds (3 days).
pub const COOKIE_TTL_SECS: i64 = 3 * 24 * 60 * 60;

/// Lifetime of a cookie-backed identity.
pub fn cookie_ttl() -> Duration {
    Duration::seconds(COOKIE_TTL_SECS)
}

/// Mint a fresh random conversation id.
pub fn new_conversation_id() -> String {
    Uuid::new_v4().to_string()
}
