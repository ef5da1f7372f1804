use serde::{Deserialize, Serialize};

/// A finalized intake record, ready to be forwarded to the admin recipient.
///
/// Built only from a conversation that has collected all three fields; the
/// text values are stored exactly as the user sent them (trimmed, otherwise
/// unvalidated).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub telegram_id: i64,
    pub username: Option<String>,
}
