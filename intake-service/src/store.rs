use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use teloxide::types::ChatId;

use crate::state::Conversation;

/// Process-wide map of per-chat conversation state.
///
/// Contents are volatile and lost on restart. Writers are single per chat
/// id: the webhook handler processes an update for a chat to completion
/// before the next one is applied, so callers snapshot with `get`, mutate,
/// and write back with `put`.
#[derive(Default)]
pub struct ConversationStore {
    conversations: Mutex<HashMap<ChatId, Conversation>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, chat_id: ChatId) -> Option<Conversation> {
        self.lock().get(&chat_id).cloned()
    }

    pub fn put(&self, chat_id: ChatId, conversation: Conversation) {
        self.lock().insert(chat_id, conversation);
    }

    /// Creates or overwrites the chat's state with a fresh name-step
    /// conversation and returns it.
    pub fn reset(&self, chat_id: ChatId) -> Conversation {
        let fresh = Conversation::default();
        self.lock().insert(chat_id, fresh.clone());
        fresh
    }

    pub fn delete(&self, chat_id: ChatId) {
        self.lock().remove(&chat_id);
    }

    pub fn contains(&self, chat_id: ChatId) -> bool {
        self.lock().contains_key(&chat_id)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ChatId, Conversation>> {
        self.conversations
            .lock()
            .expect("conversation store mutex poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Step;

    const CHAT: ChatId = ChatId(7);

    #[test]
    fn test_reset_overwrites_existing_state() {
        let store = ConversationStore::new();

        let mut convo = store.reset(CHAT);
        convo.advance(Some(1), None, "Jane");
        store.put(CHAT, convo);

        let fresh = store.reset(CHAT);
        assert_eq!(fresh.step, Step::Name);
        assert_eq!(store.get(CHAT), Some(Conversation::default()));
    }

    #[test]
    fn test_delete_leaves_chat_absent() {
        let store = ConversationStore::new();
        store.reset(CHAT);
        assert!(store.contains(CHAT));

        store.delete(CHAT);
        assert!(!store.contains(CHAT));
        assert_eq!(store.get(CHAT), None);
    }

    #[test]
    fn test_chats_are_independent() {
        let store = ConversationStore::new();
        let other = ChatId(8);

        let mut convo = store.reset(CHAT);
        convo.advance(Some(1), None, "Jane");
        store.put(CHAT, convo);
        store.reset(other);

        assert_eq!(store.get(other), Some(Conversation::default()));
        assert_eq!(store.get(CHAT).unwrap().step, Step::Email);
    }
}
