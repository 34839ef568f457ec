use thiserror::Error;

/// Errors from repository operations (used by trait definitions in wrelay-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Errors from the downstream chat provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider unreachable: {0}")]
    Transport(String),

    #[error("provider timed out")]
    Timeout,

    #[error("provider returned status {0}")]
    Status(u16),
}

/// Errors surfaced by the relay service.
///
/// None of these is fatal to the process; each request fails on its own.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Missing or malformed request fields. Nothing was persisted.
    #[error("validation error: {0}")]
    Validation(String),

    /// The downstream provider failed. The inbound envelope stays stored.
    #[error("upstream error: {0}")]
    Upstream(#[from] ProviderError),

    /// The envelope log failed. Earlier steps are not rolled back.
    #[error("persistence error: {0}")]
    Persistence(#[from] RepositoryError),
}

/// Errors from client-side identity and preference storage.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("storage io error: {0}")]
    Io(String),

    #[error("corrupt stored state: {0}")]
    Corrupt(String),
}

/// Errors from a client transport talking to the relay.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connect failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("relay returned status {0}")]
    Status(u16),

    #[error("connection closed")]
    Closed,

    #[error("invalid relay response: {0}")]
    Decode(String),
}
