use shared::errors::{Result, ServiceError};
use shared::Lead;

use crate::telegram::keyboards::{CONFIRM_ACTION, RESTART_ACTION};
use crate::telegram::messages;

/// Position in the intake flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Step {
    #[default]
    Name,
    Email,
    Phone,
    Confirm,
}

/// Per-chat conversation state.
///
/// Populated fields are always a prefix of {name, email, phone} consistent
/// with `step`: reaching `Step::Phone` implies name and email are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    pub step: Step,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub telegram_id: Option<i64>,
    pub username: Option<String>,
}

/// Outbound effect decided by one text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain text reply.
    Prompt(&'static str),
    /// Review summary, sent with the confirm/restart keyboard.
    Summary(String),
    /// The "use the buttons" reply at the confirm step.
    Reminder(&'static str),
}

impl Conversation {
    /// Applies one text message and returns the reply to send. Input is
    /// trimmed before storage; email and phone are not validated further.
    pub fn advance(
        &mut self,
        sender_id: Option<i64>,
        sender_username: Option<String>,
        text: &str,
    ) -> Reply {
        let text = text.trim();
        match self.step {
            Step::Name => {
                self.name = Some(text.to_owned());
                self.telegram_id = sender_id;
                self.username = sender_username.filter(|u| !u.is_empty());
                self.step = Step::Email;
                Reply::Prompt(messages::PROMPT_EMAIL)
            }
            Step::Email => {
                self.email = Some(text.to_owned());
                self.step = Step::Phone;
                Reply::Prompt(messages::PROMPT_PHONE)
            }
            Step::Phone => {
                self.phone = Some(text.to_owned());
                self.step = Step::Confirm;
                Reply::Summary(messages::format_summary(self))
            }
            Step::Confirm => Reply::Reminder(messages::CONFIRM_REMINDER),
        }
    }

    /// Builds the finalized record from a completed conversation.
    pub fn lead(&self) -> Result<Lead> {
        let name = self
            .name
            .clone()
            .ok_or(ServiceError::IncompleteLead("name"))?;
        let email = self
            .email
            .clone()
            .ok_or(ServiceError::IncompleteLead("email"))?;
        let phone = self
            .phone
            .clone()
            .ok_or(ServiceError::IncompleteLead("phone"))?;

        Ok(Lead {
            name,
            email,
            phone,
            telegram_id: self.telegram_id.unwrap_or(0),
            username: self.username.clone(),
        })
    }
}

/// Inline-keyboard action carried in a callback payload. Unknown payloads
/// parse to `None` and are dropped after the callback is acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    Confirm,
    Restart,
}

impl CallbackAction {
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            CONFIRM_ACTION => Some(Self::Confirm),
            RESTART_ACTION => Some(Self::Restart),
            _ => None,
        }
    }
}
