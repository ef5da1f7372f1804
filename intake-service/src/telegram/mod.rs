pub mod handlers;
pub mod keyboards;
pub mod messages;

pub use keyboards::make_confirm_keyboard;
pub use messages::{format_lead_notification, format_summary};
