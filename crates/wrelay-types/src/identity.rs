//! Client-side persisted state: the conversation identity and widget preferences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted conversation identifier.
///
/// `expires_at` is `None` for local-storage semantics (never expires) and set
/// for cookie semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredIdentity {
    pub conversation_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredIdentity {
    /// Whether the identity may still be used at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.conversation_id.is_empty() && self.expires_at.is_none_or(|exp| now < exp)
    }
}

/// Presentation preference: whether the widget is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetPrefs {
    #[serde(default)]
    pub widget_open: bool,
}
