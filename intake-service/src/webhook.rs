use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use shared::config::BotConfig;
use shared::record_counter;
use teloxide::prelude::*;
use teloxide::types::{AllowedUpdate, Update};
use tower_http::trace::TraceLayer;

use crate::store::ConversationStore;
use crate::telegram::handlers;

#[derive(Clone)]
pub struct AppState {
    pub bot: Bot,
    pub bot_username: String,
    pub store: Arc<ConversationStore>,
    pub config: Arc<BotConfig>,
}

/// The secret segment is the only authentication on the endpoint: a wrong
/// path has no route and 404s.
pub fn webhook_path(secret: &str) -> String {
    format!("/webhook/{}", secret)
}

pub fn router(state: AppState) -> Router {
    let path = webhook_path(&state.config.webhook_secret);

    Router::new()
        .route("/", get(health_check))
        .route(&path, post(receive_update))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

/// Answers 200 for every update that parses, so the platform does not
/// redeliver updates whose handling failed; handler errors are logged.
async fn receive_update(State(state): State<AppState>, Json(update): Json<Update>) -> StatusCode {
    record_counter("intake_updates_received_total", 1);

    if let Err(e) = handlers::handle_update(
        state.bot.clone(),
        &state.bot_username,
        state.store.clone(),
        state.config.clone(),
        update,
    )
    .await
    {
        tracing::error!("Update handler error: {}", e);
    }

    StatusCode::OK
}

/// Registers the webhook with the Bot API when a public base URL is
/// configured. Registration failure is logged and the server keeps serving.
pub async fn register_webhook(bot: &Bot, config: &BotConfig) {
    let Some(base_url) = config.base_url.as_deref() else {
        tracing::info!("BASE_URL not set, skipping webhook registration");
        return;
    };

    let url = format!(
        "{}{}",
        base_url.trim_end_matches('/'),
        webhook_path(&config.webhook_secret)
    );

    match url.parse() {
        Ok(parsed) => match bot
            .set_webhook(parsed)
            .allowed_updates(vec![
                AllowedUpdate::Message,
                AllowedUpdate::EditedMessage,
                AllowedUpdate::CallbackQuery,
            ])
            .await
        {
            Ok(_) => tracing::info!("Webhook registered at {}", url),
            Err(e) => tracing::error!("Error registering webhook: {}", e),
        },
        Err(e) => tracing::error!("Invalid webhook URL {}: {}", url, e),
    }
}
