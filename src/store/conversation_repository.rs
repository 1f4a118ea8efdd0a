use chrono::Utc;
use tracing::debug;

use crate::errors::AppError;
use crate::models::Conversation;
use crate::store::Store;

#[derive(Clone)]
pub struct ConversationRepository {
    store: Store,
}

impl ConversationRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// All conversations, most recently updated first.
    pub async fn find_all(&self) -> Vec<Conversation> {
        let tables = self.store.read().await;
        let mut conversations = tables.conversations.clone();
        conversations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        conversations
    }

    pub async fn find_by_id(&self, id: &str) -> Option<Conversation> {
        let tables = self.store.read().await;
        tables.conversations.iter().find(|c| c.id == id).cloned()
    }

    pub async fn save(&self, conversation: &Conversation) -> Conversation {
        let mut tables = self.store.write().await;
        debug!("Saving conversation {}", conversation.id);
        tables.conversations.push(conversation.clone());
        conversation.clone()
    }

    /// Set a new title and bump `updated_at`.
    pub async fn rename(&self, id: &str, title: &str) -> Result<Conversation, AppError> {
        let mut tables = self.store.write().await;
        let conversation = tables
            .conversations
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::ConversationNotFound { id: id.to_string() })?;
        conversation.title = title.to_string();
        conversation.updated_at = Utc::now();
        Ok(conversation.clone())
    }

    /// Record a new exchange: update `last_message` and bump `updated_at`.
    pub async fn touch(&self, id: &str, last_message: &str) -> Result<(), AppError> {
        let mut tables = self.store.write().await;
        let conversation = tables
            .conversations
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::ConversationNotFound { id: id.to_string() })?;
        conversation.last_message = last_message.to_string();
        conversation.updated_at = Utc::now();
        Ok(())
    }

    /// Remove a conversation and, in the same critical section, every message
    /// it owns; messages have no lifetime independent of their conversation.
    /// Unknown ids fail, so a repeated delete of the same id fails too.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut tables = self.store.write().await;
        let before = tables.conversations.len();
        tables.conversations.retain(|c| c.id != id);
        if tables.conversations.len() == before {
            return Err(AppError::ConversationNotFound { id: id.to_string() });
        }
        tables.messages.remove(id);
        debug!("Deleted conversation {id}");
        Ok(())
    }
}

#[cfg(test)]
#[path = "conversation_repository_test.rs"]
mod tests;
