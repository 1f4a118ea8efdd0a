use crate::models::Message;
use crate::store::Store;

#[derive(Clone)]
pub struct MessageRepository {
    store: Store,
}

impl MessageRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Messages for a conversation, ascending by creation time. An id with no
    /// stored messages (including an unknown one) yields an empty list; the
    /// client renders its new-chat placeholder from that.
    pub async fn find_by_conversation_id(&self, conversation_id: &str) -> Vec<Message> {
        let tables = self.store.read().await;
        let mut messages = tables
            .messages
            .get(conversation_id)
            .cloned()
            .unwrap_or_default();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        messages
    }

    pub async fn save(&self, message: &Message) -> Message {
        let mut tables = self.store.write().await;
        tables
            .messages
            .entry(message.conversation_id.clone())
            .or_default()
            .push(message.clone());
        message.clone()
    }
}

#[cfg(test)]
#[path = "message_repository_test.rs"]
mod tests;
