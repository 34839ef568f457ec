//! SQLite storage layer.
//!
//! The append-only envelope log, backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod envelope;
pub mod pool;
