use std::sync::Arc;
use std::time::Duration;

use intake_service::store::ConversationStore;
use intake_service::webhook::{self, AppState};
use shared::config::BotConfig;
use teloxide::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    shared::init_tracing("intake-service")?;

    let config = BotConfig::from_env()?;

    shared::init_metrics(config.metrics_port)?;

    tracing::info!("Starting Intake Service...");
    tracing::info!("Configuration:");
    tracing::info!("  Listen port: {}", config.port);
    tracing::info!("  Metrics port: {}", config.metrics_port);
    tracing::info!("  Admin recipient configured: {}", config.admin_chat_id.is_some());
    tracing::info!("  Public base URL configured: {}", config.base_url.is_some());

    let bot = Bot::new(config.bot_token.clone());

    let me = loop {
        match bot.get_me().await {
            Ok(me) => {
                tracing::info!("Bot username: @{}", me.username());
                break me;
            }
            Err(e) => {
                tracing::warn!("Failed to get bot info (will retry): {}", e);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    };

    let store = Arc::new(ConversationStore::new());

    webhook::register_webhook(&bot, &config).await;

    let port = config.port;
    let state = AppState {
        bot,
        bot_username: me.username().to_owned(),
        store,
        config: Arc::new(config),
    };

    let app = webhook::router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    tracing::info!("Webhook server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
