//! Axum router configuration with middleware.
//!
//! Routes are mounted at the root, where the widget expects them.
//! Middleware: CORS (the widget is embedded in arbitrary pages), tracing.

use axum::Router;
use axum::extract::State;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete relay router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Stateless relay
        .route("/send-message", post(handlers::message::send_message))
        // Conversation-aware relay
        .route("/messages", post(handlers::message::post_message))
        .route("/messages/{widget_id}", get(handlers::message::get_messages))
        // Browser identity cookie
        .route("/identity", get(handlers::identity::get_identity))
        // Streaming transport
        .route("/ws", get(handlers::ws::ws_handler))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint with the configured provider kind.
async fn health_check(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": state.config.provider.kind,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use chrono::{Duration, Utc};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use wrelay_core::provider::box_provider::BoxReplyProvider;
    use wrelay_core::provider::reply::{ProviderReply, ReplyProvider};
    use wrelay_core::repository::envelope::EnvelopeRepository;
    use wrelay_types::envelope::{Envelope, Sender};
    use wrelay_types::error::ProviderError;

    use crate::state::test_support::test_state;

    /// Provider stub that answers with a fixed text, or fails.
    struct StubProvider {
        reply: Result<&'static str, u16>,
    }

    impl ReplyProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn reply(&self, _text: &str) -> Result<ProviderReply, ProviderError> {
            match self.reply {
                Ok(text) => Ok(ProviderReply::text(text)),
                Err(status) => Err(ProviderError::Status(status)),
            }
        }
    }

    async fn app_with(reply: Result<&'static str, u16>) -> (Router, AppState) {
        let state = test_state(BoxReplyProvider::new(StubProvider { reply })).await;
        (build_router(state.clone()), state)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .method(Method::POST)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .method(Method::GET)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn stored(state: &AppState, widget_id: &str) -> u64 {
        state
            .relay_service
            .repo()
            .count_by_conversation(widget_id)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (app, _) = app_with(Ok("hi")).await;
        let response = app.oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert!(json["version"].is_string());
        assert_eq!(json["provider"], "http");
    }

    #[tokio::test]
    async fn test_post_message_returns_bot_reply() {
        let (app, state) = app_with(Ok("hi there")).await;

        let response = app
            .oneshot(post_json(
                "/messages",
                json!({"widgetId": "w1", "messageId": "m1", "text": "hello", "sender": "user"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"]["widgetId"], "w1");
        assert_eq!(json["message"]["text"], "hi there");
        assert_eq!(json["message"]["sender"], "bot");
        assert!(json["message"]["messageId"].is_string());
        assert_ne!(json["message"]["messageId"], "m1");
        assert_eq!(stored(&state, "w1").await, 2);
    }

    #[tokio::test]
    async fn test_post_message_missing_fields() {
        let (app, state) = app_with(Ok("hi there")).await;

        let response = app
            .oneshot(post_json(
                "/messages",
                json!({"widgetId": "w1", "messageId": "m2", "text": ""}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Missing fields in request body"})
        );
        assert_eq!(stored(&state, "w1").await, 0);
    }

    #[tokio::test]
    async fn test_post_message_malformed_body() {
        let (app, _) = app_with(Ok("hi")).await;

        let request = Request::builder()
            .uri("/messages")
            .method(Method::POST)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Missing fields in request body"
        );
    }

    #[tokio::test]
    async fn test_provider_failure_keeps_inbound() {
        let (app, state) = app_with(Err(502)).await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/messages",
                json!({"widgetId": "w1", "messageId": "m1", "text": "hello", "sender": "user"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({"error": "Error processing message"}));

        let response = app.oneshot(get("/messages/w1")).await.unwrap();
        let json = body_json(response).await;
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["messageId"], "m1");
        assert_eq!(messages[0]["sender"], "user");
    }

    #[tokio::test]
    async fn test_get_messages_sorted_by_timestamp() {
        let (app, state) = app_with(Ok("hi")).await;
        let base = Utc::now();
        let repo = state.relay_service.repo();

        for (id, offset) in [("c", 30), ("a", 10), ("b", 20)] {
            repo.append(&Envelope {
                widget_id: "w1".to_string(),
                message_id: id.to_string(),
                text: format!("text {id}"),
                sender: Sender::User,
                timestamp: base + Duration::seconds(offset),
            })
            .await
            .unwrap();
        }

        let response = app.oneshot(get("/messages/w1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        let ids: Vec<&str> = json["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["messageId"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_get_messages_unknown_widget_is_empty() {
        let (app, _) = app_with(Ok("hi")).await;
        let response = app.oneshot(get("/messages/nobody")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"success": true, "messages": []}));
    }

    #[tokio::test]
    async fn test_send_message_returns_reply() {
        let (app, _) = app_with(Ok("hi there")).await;

        let response = app
            .oneshot(post_json("/send-message", json!({"message": "hello"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"success": true, "response": {"message": "hi there"}})
        );
    }

    #[tokio::test]
    async fn test_send_message_requires_message() {
        let (app, _) = app_with(Ok("hi there")).await;

        let response = app
            .oneshot(post_json("/send-message", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Message is required"}));
    }

    #[tokio::test]
    async fn test_send_message_forwarding_failure() {
        let (app, _) = app_with(Err(500)).await;

        let response = app
            .oneshot(post_json("/send-message", json!({"message": "hello"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_identity_issues_cookie_once() {
        let (app, _) = app_with(Ok("hi")).await;

        let response = app.clone().oneshot(get("/identity")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(cookie.contains("Max-Age=259200"));

        let json = body_json(response).await;
        assert_eq!(json["created"], true);
        let widget_id = json["widgetId"].as_str().unwrap().to_string();
        assert!(cookie.starts_with(&format!("widgetId={widget_id}")));

        let request = Request::builder()
            .uri("/identity")
            .header(header::COOKIE, format!("widgetId={widget_id}"))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert!(response.headers().get(header::SET_COOKIE).is_none());

        let json = body_json(response).await;
        assert_eq!(json["created"], false);
        assert_eq!(json["widgetId"], widget_id);
    }
}
