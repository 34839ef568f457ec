//! HttpChatProvider -- forwards user text to the downstream chat service.
//!
//! Two request styles are supported:
//!
//! - `query`: `GET {url}?text=<text>`, reply read from `{"text": ...}`
//! - `json`: `POST {url}` with `{"query": <text>}`, reply read from `{"response": ...}`
//!
//! Either reply field is accepted in both styles. A successful response
//! without usable text yields an empty [`ProviderReply`].

use std::time::Duration;

use serde::Serialize;

use wrelay_core::provider::reply::{ProviderReply, ReplyProvider};
use wrelay_types::config::{ProviderConfig, RequestStyle};
use wrelay_types::error::ProviderError;

#[derive(Serialize)]
struct ChatQuery<'a> {
    query: &'a str,
}

/// Downstream chat service client.
pub struct HttpChatProvider {
    client: reqwest::Client,
    url: String,
    style: RequestStyle,
}

impl HttpChatProvider {
    pub fn new(url: String, style: RequestStyle, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport(format!("failed to create http client: {e}")))?;

        Ok(Self { client, url, style })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Self::new(
            config.url.clone(),
            config.style,
            Duration::from_secs(config.timeout_secs),
        )
    }

    async fn send(&self, text: &str) -> Result<reqwest::Response, reqwest::Error> {
        match self.style {
            RequestStyle::Query => {
                self.client
                    .get(&self.url)
                    .query(&[("text", text)])
                    .send()
                    .await
            }
            RequestStyle::Json => {
                self.client
                    .post(&self.url)
                    .json(&ChatQuery { query: text })
                    .send()
                    .await
            }
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Transport(err.to_string())
    }
}

/// Pull the reply text out of a provider response body.
fn extract_text(body: &serde_json::Value) -> Option<String> {
    ["text", "response"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(|v| v.as_str()))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

impl ReplyProvider for HttpChatProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn reply(&self, text: &str) -> Result<ProviderReply, ProviderError> {
        let response = self.send(text).await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        if bytes.is_empty() {
            return Ok(ProviderReply::empty());
        }

        // A body that is not JSON carries no reply text; the relay falls back.
        let body: serde_json::Value = match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(err) => {
                tracing::debug!(url = %self.url, error = %err, "Provider reply is not JSON");
                return Ok(ProviderReply::empty());
            }
        };

        tracing::debug!(url = %self.url, "Provider replied");
        Ok(ProviderReply {
            text: extract_text(&body),
        })
    }
}
