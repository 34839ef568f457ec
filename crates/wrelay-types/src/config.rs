//! Configuration types for the widget relay.
//!
//! `RelayConfig` represents the top-level `config.toml`. Every section and
//! field has a default, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration, loaded from `~/.wrelay/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

/// Where the relay listens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Envelope log location. `url = None` means `{data_dir}/wrelay.db`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
}

/// Which reply provider backs the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Forward to the downstream chat service over HTTP.
    Http,
    /// Answer with a random canned string. Stub/test mode.
    Canned,
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(ProviderKind::Http),
            "canned" => Ok(ProviderKind::Canned),
            other => Err(format!("unknown provider kind: '{other}'")),
        }
    }
}

/// How the HTTP provider phrases its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStyle {
    /// `GET {url}?text=...`, reply in `{"text": ...}`.
    Query,
    /// `POST {url}` with `{"query": ...}`, reply in `{"response": ...}`.
    Json,
}

/// Downstream provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_kind")]
    pub kind: ProviderKind,
    #[serde(default = "default_provider_url")]
    pub url: String,
    #[serde(default = "default_style")]
    pub style: RequestStyle,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Reply text used when the provider answers without any text.
    #[serde(default = "default_fallback_text")]
    pub fallback_text: String,
    #[serde(default = "default_canned_replies")]
    pub canned_replies: Vec<String>,
}

fn default_kind() -> ProviderKind {
    ProviderKind::Http
}

fn default_provider_url() -> String {
    "http://localhost:8000/chat".to_string()
}

fn default_style() -> RequestStyle {
    RequestStyle::Query
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_fallback_text() -> String {
    "Brak odpowiedzi".to_string()
}

fn default_canned_replies() -> Vec<String> {
    vec!["yes".to_string(), "no".to_string(), "I don't know".to_string()]
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            url: default_provider_url(),
            style: default_style(),
            timeout_secs: default_timeout_secs(),
            fallback_text: default_fallback_text(),
            canned_replies: default_canned_replies(),
        }
    }
}

/// Settings for the command-line client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Identity lifetime. `0` keeps the identity forever.
    #[serde(default = "default_identity_ttl_hours")]
    pub identity_ttl_hours: u32,
    /// Keep the identity forever regardless of `identity_ttl_hours`.
    #[serde(default)]
    pub persistent: bool,
}

fn default_server_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_identity_ttl_hours() -> u32 {
    72
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            identity_ttl_hours: default_identity_ttl_hours(),
            persistent: false,
        }
    }
}
