//! Shared domain types for the widget relay.
//!
//! Message envelopes, client-side identity state, configuration, and the
//! error types used across the workspace.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod envelope;
pub mod error;
pub mod identity;
