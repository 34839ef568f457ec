//! Cookie-based conversation identity for browser widgets.
//!
//! GET /identity returns the `widgetId` cookie value when the browser already
//! has one, otherwise mints an id and sets the cookie for three days.

use axum::http::HeaderMap;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::response::{AppendHeaders, IntoResponse, Response};

use wrelay_core::identity::{COOKIE_NAME, COOKIE_TTL_SECS, new_conversation_id};

use crate::http::response::{IdentityBody, Success};

/// Find a cookie value by name in the request's `Cookie` headers.
fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// GET /identity - Get or create the browser's conversation id.
pub async fn get_identity(headers: HeaderMap) -> Response {
    if let Some(widget_id) = read_cookie(&headers, COOKIE_NAME) {
        return Success::new(IdentityBody {
            widget_id,
            created: false,
        })
        .into_response();
    }

    let widget_id = new_conversation_id();
    tracing::info!(widget_id = %widget_id, "Issued new conversation id");

    let cookie = format!("{COOKIE_NAME}={widget_id}; Path=/; SameSite=Lax; Max-Age={COOKIE_TTL_SECS}");
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Success::new(IdentityBody {
            widget_id,
            created: true,
        }),
    )
        .into_response()
}
