use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Callback payload sent by the confirm button.
pub const CONFIRM_ACTION: &str = "CONFIRM";
/// Callback payload sent by the start-over button.
pub const RESTART_ACTION: &str = "RESTART";

pub fn make_confirm_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("✅ Confirm", CONFIRM_ACTION)],
        vec![InlineKeyboardButton::callback("✏️ Start over", RESTART_ACTION)],
    ])
}
