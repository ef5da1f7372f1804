use std::sync::Arc;

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use intake_service::store::ConversationStore;
use intake_service::webhook::{router, webhook_path, AppState};
use shared::config::BotConfig;
use teloxide::Bot;
use tower::ServiceExt;

fn test_config() -> BotConfig {
    BotConfig {
        bot_token: "123456:TEST_TOKEN".to_string(),
        admin_chat_id: None,
        webhook_secret: "s3cr3t".to_string(),
        base_url: None,
        port: 3000,
        metrics_port: 9091,
    }
}

fn test_state() -> AppState {
    AppState {
        bot: Bot::new("123456:TEST_TOKEN"),
        bot_username: "intake_test_bot".to_string(),
        store: Arc::new(ConversationStore::new()),
        config: Arc::new(test_config()),
    }
}

#[tokio::test]
async fn test_health_check_returns_ok() -> Result<()> {
    let app = router(test_state());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), 1024).await?;
    assert_eq!(&body[..], b"OK");

    Ok(())
}

#[tokio::test]
async fn test_wrong_secret_segment_is_not_routed() -> Result<()> {
    let app = router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook/wrong")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"update_id":1}"#))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_rejected() -> Result<()> {
    let state = test_state();
    let path = webhook_path(&state.config.webhook_secret);
    let app = router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(&path)
                .header("content-type", "application/json")
                .body(Body::from("not json"))?,
        )
        .await?;

    assert!(response.status().is_client_error());

    Ok(())
}

#[tokio::test]
async fn test_update_without_actionable_kind_is_acknowledged() -> Result<()> {
    let state = test_state();
    let path = webhook_path(&state.config.webhook_secret);
    let app = router(state);

    // Parses as an update we do not act on; still 200 so the platform
    // does not redeliver it.
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(&path)
                .header("content-type", "application/json")
                .body(Body::from(r#"{"update_id":7}"#))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[test]
fn test_webhook_path_contains_secret_segment() {
    assert_eq!(webhook_path("s3cr3t"), "/webhook/s3cr3t");
}
