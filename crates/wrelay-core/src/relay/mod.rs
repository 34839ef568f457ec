//! Relay service orchestrating validation, persistence, and provider calls.

pub mod service;
