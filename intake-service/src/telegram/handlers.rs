use std::sync::Arc;

use shared::config::BotConfig;
use shared::errors::{Result, ServiceError};
use shared::{record_counter, Lead};
use teloxide::{
    prelude::*,
    types::{CallbackQuery, ChatId, Message, Recipient, Update, UpdateKind},
    utils::command::BotCommands,
};

use crate::state::{CallbackAction, Reply};
use crate::store::ConversationStore;
use crate::telegram::{make_confirm_keyboard, messages};

fn map_teloxide_err<E: std::fmt::Display>(e: E) -> ServiceError {
    ServiceError::Telegram(e.to_string())
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the intake flow from the beginning")]
    Start,
}

/// Entry point for one webhook update. The webhook also subscribes to
/// edited messages; those and any other kinds are received but not acted on.
pub async fn handle_update(
    bot: Bot,
    bot_username: &str,
    store: Arc<ConversationStore>,
    config: Arc<BotConfig>,
    update: Update,
) -> Result<()> {
    match update.kind {
        UpdateKind::Message(msg) => handle_message(bot, bot_username, store, msg).await,
        UpdateKind::CallbackQuery(q) => handle_callback_query(bot, store, config, q).await,
        _ => Ok(()),
    }
}

pub async fn handle_message(
    bot: Bot,
    bot_username: &str,
    store: Arc<ConversationStore>,
    msg: Message,
) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    match BotCommands::parse(text, bot_username) {
        Ok(Command::Start) => handle_start(&bot, &store, &msg).await,
        Err(_) => handle_text(&bot, &store, &msg).await,
    }
}

/// /start resets the chat to a fresh name-step conversation, whatever state
/// it was in before.
async fn handle_start(bot: &Bot, store: &ConversationStore, msg: &Message) -> Result<()> {
    store.reset(msg.chat.id);
    bot.send_message(msg.chat.id, messages::GREETING)
        .await
        .map_err(map_teloxide_err)?;
    Ok(())
}

async fn handle_text(bot: &Bot, store: &ConversationStore, msg: &Message) -> Result<()> {
    let chat_id = msg.chat.id;
    let text = msg.text().unwrap_or_default();

    // A text message for a chat we know nothing about is an implicit restart.
    let Some(mut conversation) = store.get(chat_id) else {
        store.reset(chat_id);
        bot.send_message(chat_id, messages::START_OVER)
            .await
            .map_err(map_teloxide_err)?;
        return Ok(());
    };

    let sender_id = msg.from.as_ref().map(|u| u.id.0 as i64);
    let sender_username = msg.from.as_ref().and_then(|u| u.username.clone());

    let reply = conversation.advance(sender_id, sender_username, text);
    store.put(chat_id, conversation);

    match reply {
        Reply::Prompt(text) | Reply::Reminder(text) => {
            bot.send_message(chat_id, text)
                .await
                .map_err(map_teloxide_err)?;
        }
        Reply::Summary(text) => {
            bot.send_message(chat_id, text)
                .reply_markup(make_confirm_keyboard())
                .await
                .map_err(map_teloxide_err)?;
        }
    }

    Ok(())
}

/// Buttons are processed for any chat state: a press on a stale keyboard
/// still confirms or restarts the conversation it belongs to.
pub async fn handle_callback_query(
    bot: Bot,
    store: Arc<ConversationStore>,
    config: Arc<BotConfig>,
    q: CallbackQuery,
) -> Result<()> {
    // The transport requires the press to be acknowledged before any reply.
    bot.answer_callback_query(q.id.clone())
        .await
        .map_err(map_teloxide_err)?;

    let Some(action) = q.data.as_deref().and_then(CallbackAction::parse) else {
        return Ok(());
    };
    let Some(msg) = q.message.as_ref().and_then(|m| m.regular_message()) else {
        return Ok(());
    };
    let chat_id = msg.chat.id;

    match action {
        CallbackAction::Confirm => {
            match store.get(chat_id).unwrap_or_default().lead() {
                Ok(lead) => forward_lead(&bot, config.admin_chat_id.as_deref(), &lead).await,
                Err(e) => tracing::warn!(
                    chat_id = chat_id.0,
                    "confirmed without a complete conversation, nothing forwarded: {}",
                    e
                ),
            }

            bot.edit_message_text(chat_id, msg.id, messages::CONFIRMED_NOTICE)
                .await
                .map_err(map_teloxide_err)?;
            store.delete(chat_id);
        }
        CallbackAction::Restart => {
            store.reset(chat_id);
            bot.edit_message_text(chat_id, msg.id, messages::RESTART_NOTICE)
                .await
                .map_err(map_teloxide_err)?;
        }
    }

    Ok(())
}

/// Best-effort delivery of a finalized lead to the admin recipient. A
/// failure is logged and swallowed; the user-facing success notice is not
/// held up by it.
pub async fn forward_lead(bot: &Bot, admin_chat_id: Option<&str>, lead: &Lead) {
    let Some(admin) = admin_chat_id else {
        tracing::debug!("ADMIN_CHAT_ID not configured, skipping lead forward");
        return;
    };

    match bot
        .send_message(admin_recipient(admin), messages::format_lead_notification(lead))
        .await
    {
        Ok(_) => {
            record_counter("intake_leads_forwarded_total", 1);
            tracing::info!(telegram_id = lead.telegram_id, "lead forwarded to admin recipient");
        }
        Err(e) => {
            record_counter("intake_lead_forward_failures_total", 1);
            tracing::error!("Error sending lead to ADMIN_CHAT_ID: {}", e);
        }
    }
}

/// ADMIN_CHAT_ID is either a numeric chat id or an `@channelusername`.
fn admin_recipient(raw: &str) -> Recipient {
    match raw.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(raw.to_string()),
    }
}
