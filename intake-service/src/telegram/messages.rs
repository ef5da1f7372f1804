use shared::Lead;

use crate::state::Conversation;

pub const GREETING: &str =
    "Hi 👋 I'm the intake bot.\nPlease tell me your first and last name:";
pub const START_OVER: &str = "Let's start over. What is your first and last name?";
pub const PROMPT_EMAIL: &str = "Great. Now your email address:";
pub const PROMPT_PHONE: &str = "Thanks. Now your phone number (with area code):";
pub const CONFIRM_REMINDER: &str = "Please tap an option: ✅ Confirm or ✏️ Start over.";
pub const CONFIRMED_NOTICE: &str = "✅ All set! Your details were submitted. Thank you.";
pub const RESTART_NOTICE: &str = "Ok, let's start again.\nWhat is your first and last name?";

/// The review summary shown before the confirm/restart keyboard. The
/// username line appears only when a username was captured.
pub fn format_summary(convo: &Conversation) -> String {
    let mut summary = format!(
        "📋 Please review your details:\n\
        • Name: {}\n\
        • Email: {}\n\
        • Phone: {}\n\
        • Telegram ID: {}\n",
        convo.name.as_deref().unwrap_or("-"),
        convo.email.as_deref().unwrap_or("-"),
        convo.phone.as_deref().unwrap_or("-"),
        convo
            .telegram_id
            .map_or_else(|| "-".to_string(), |id| id.to_string()),
    );
    if let Some(username) = convo.username.as_deref() {
        summary.push_str(&format!("• Username: @{}\n", username));
    }
    summary.push_str("\nIs everything correct?");
    summary
}

/// The notification delivered to the admin recipient on confirmation.
pub fn format_lead_notification(lead: &Lead) -> String {
    let mut notification = format!(
        "🆕 New lead\n\
        • Name: {}\n\
        • Email: {}\n\
        • Phone: {}\n\
        • Telegram ID: {}\n",
        lead.name, lead.email, lead.phone, lead.telegram_id,
    );
    if let Some(username) = lead.username.as_deref() {
        notification.push_str(&format!("• Username: @{}\n", username));
    }
    notification
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed_conversation() -> Conversation {
        let mut convo = Conversation::default();
        convo.advance(Some(42), Some("janedoe".to_string()), "Jane Doe");
        convo.advance(Some(42), Some("janedoe".to_string()), "jane@x.com");
        convo.advance(Some(42), Some("janedoe".to_string()), "555-1234");
        convo
    }

    #[test]
    fn test_format_summary_contains_captured_fields() {
        let summary = format_summary(&completed_conversation());

        assert!(summary.contains("Jane Doe"));
        assert!(summary.contains("jane@x.com"));
        assert!(summary.contains("555-1234"));
        assert!(summary.contains("42"));
        assert!(summary.contains("@janedoe"));
    }

    #[test]
    fn test_format_summary_omits_missing_username() {
        let mut convo = Conversation::default();
        convo.advance(Some(42), None, "Jane Doe");
        convo.advance(Some(42), None, "jane@x.com");
        convo.advance(Some(42), None, "555-1234");

        let summary = format_summary(&convo);

        assert!(!summary.contains("Username"));
        assert!(summary.contains("Jane Doe"));
    }

    #[test]
    fn test_format_lead_notification() {
        let lead = completed_conversation().lead().unwrap();
        let notification = format_lead_notification(&lead);

        assert!(notification.contains("New lead"));
        assert!(notification.contains("Jane Doe"));
        assert!(notification.contains("jane@x.com"));
        assert!(notification.contains("555-1234"));
        assert!(notification.contains("@janedoe"));
    }

    #[test]
    fn test_format_lead_notification_without_username() {
        let mut lead = completed_conversation().lead().unwrap();
        lead.username = None;

        let notification = format_lead_notification(&lead);

        assert!(!notification.contains("Username"));
    }
}
