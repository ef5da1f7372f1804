use std::env;

use crate::errors::{Result, ServiceError};

/// Fallback secret segment for the webhook path when BOT_SECRET is unset.
pub const DEFAULT_WEBHOOK_SECRET: &str = "secret";

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bot API token. The process refuses to start without it.
    pub bot_token: String,
    /// Destination for finalized leads: a numeric chat id or an
    /// `@channelusername`. Forwarding is skipped when unset.
    pub admin_chat_id: Option<String>,
    /// Secret path segment of the webhook endpoint.
    pub webhook_secret: String,
    /// Public base URL of this service. Webhook registration is skipped
    /// when unset.
    pub base_url: Option<String>,
    pub port: u16,
    pub metrics_port: u16,
}

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bot_token: env::var("BOT_TOKEN")
                .map_err(|_| ServiceError::Config("BOT_TOKEN not set".to_string()))?,
            admin_chat_id: env::var("ADMIN_CHAT_ID").ok().filter(|v| !v.is_empty()),
            webhook_secret: env::var("BOT_SECRET")
                .unwrap_or_else(|_| DEFAULT_WEBHOOK_SECRET.to_string()),
            base_url: env::var("BASE_URL").ok().filter(|v| !v.is_empty()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|e| ServiceError::Config(format!("Invalid PORT: {}", e)))?,
            metrics_port: env::var("METRICS_PORT")
                .unwrap_or_else(|_| "9091".to_string())
                .parse()
                .map_err(|e| ServiceError::Config(format!("Invalid METRICS_PORT: {}", e)))?,
        })
    }
}
