//! Configuration loader for the widget relay.
//!
//! Reads `config.toml` from the data directory (`~/.wrelay/` by default)
//! and deserializes it into [`RelayConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::Path;

use wrelay_types::config::RelayConfig;

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`RelayConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_config(data_dir: &Path) -> RelayConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return RelayConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return RelayConfig::default();
        }
    };

    match toml::from_str::<RelayConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            RelayConfig::default()
        }
    }
}

/// Identity lifetime from the client config.
///
/// `persistent = true` or `identity_ttl_hours = 0` means no expiry.
pub fn identity_ttl(config: &RelayConfig) -> Option<chrono::Duration> {
    if config.client.persistent {
        return None;
    }
    match config.client.identity_ttl_hours {
        0 => None,
        hours => Some(chrono::Duration::hours(i64::from(hours))),
    }
}
