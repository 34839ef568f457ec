//! Application state wiring the relay together.
//!
//! `RelayService` is generic over the envelope repository; AppState pins it to
//! the SQLite implementation.

use std::path::PathBuf;
use std::sync::Arc;

use wrelay_core::relay::service::RelayService;
use wrelay_infra::provider::build_provider;
use wrelay_infra::sqlite::envelope::SqliteEnvelopeRepository;
use wrelay_infra::sqlite::pool::{DatabasePool, default_database_url};
use wrelay_types::config::RelayConfig;

/// Concrete relay service type pinned to infra implementations.
pub type ConcreteRelayService = RelayService<SqliteEnvelopeRepository>;

/// Shared state for the HTTP and WebSocket handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay_service: Arc<ConcreteRelayService>,
    pub config: Arc<RelayConfig>,
}

impl AppState {
    /// Initialize the relay: open the envelope log and build the configured provider.
    pub async fn init(data_dir: PathBuf, config: RelayConfig) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_url = config
            .database
            .url
            .clone()
            .unwrap_or_else(|| default_database_url(&data_dir));
        let db_pool = DatabasePool::new(&db_url).await?;

        let provider = build_provider(&config.provider)?;
        let relay_service = RelayService::new(
            SqliteEnvelopeRepository::new(db_pool),
            provider,
            config.provider.fallback_text.clone(),
        );

        Ok(Self::new(relay_service, config))
    }

    pub fn new(relay_service: ConcreteRelayService, config: RelayConfig) -> Self {
        Self {
            relay_service: Arc::new(relay_service),
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use wrelay_core::provider::box_provider::BoxReplyProvider;

    /// State backed by a throwaway SQLite file and the given provider.
    pub async fn test_state(provider: BoxReplyProvider) -> AppState {
        let dir = tempfile::tempdir().unwrap();
        let url = default_database_url(dir.path());
        std::mem::forget(dir);

        let pool = DatabasePool::new(&url).await.unwrap();
        let config = RelayConfig::default();
        let relay_service = RelayService::new(
            SqliteEnvelopeRepository::new(pool),
            provider,
            config.provider.fallback_text.clone(),
        );
        AppState::new(relay_service, config)
    }
}
