//! Reply provider abstraction.
//!
//! A reply provider produces reply text for a piece of user input. The real
//! downstream chat service and the canned-reply stub are both providers; the
//! relay picks one by configuration and never branches on which it got.

pub mod box_provider;
pub mod reply;
