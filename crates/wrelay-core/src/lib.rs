//! Relay logic and port trait definitions for the widget relay.
//!
//! This crate defines the "ports" (repository, provider, identity storage,
//! and transport traits) that the infrastructure layer implements. It depends
//! only on `wrelay-types` -- never on `wrelay-infra` or any database/IO crate.

pub mod identity;
pub mod provider;
pub mod relay;
pub mod repository;
pub mod transport;
