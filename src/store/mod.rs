//! In-memory data store.
//!
//! State lives for the process lifetime only. `Store` is the shared handle
//! cloned into each repository, the way a connection pool would be; all
//! ordering happens at the read edge, so the tables themselves stay
//! insertion-ordered.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{Conversation, Message, MessageRole};

pub mod conversation_repository;
pub mod message_repository;

pub type Store = Arc<RwLock<Tables>>;

#[derive(Default)]
pub struct Tables {
    pub conversations: Vec<Conversation>,
    /// Messages keyed by owning conversation id. A conversation with no
    /// messages yet simply has no entry here.
    pub messages: HashMap<String, Vec<Message>>,
}

/// An empty store. Tests build one per case so nothing is shared.
#[cfg(test)]
pub fn empty() -> Store {
    Arc::new(RwLock::new(Tables::default()))
}

/// A store pre-populated with the demo conversations the client ships with.
pub fn seeded() -> Store {
    let now = Utc::now();
    let hour_ago = now - chrono::Duration::hours(1);

    let mut tables = Tables::default();

    tables.conversations.push(Conversation {
        id: "chat-1".to_string(),
        title: "First Conversation".to_string(),
        last_message: "What can you help me with?".to_string(),
        created_at: now - chrono::Duration::minutes(5),
        updated_at: now,
    });
    tables.conversations.push(Conversation {
        id: "chat-2".to_string(),
        title: "Data Analysis".to_string(),
        last_message: "Can you analyze this dataset?".to_string(),
        created_at: hour_ago,
        updated_at: hour_ago,
    });

    tables.messages.insert(
        "chat-1".to_string(),
        vec![
            Message {
                id: "msg-1".to_string(),
                conversation_id: "chat-1".to_string(),
                role: MessageRole::User,
                content: "What can you help me with?".to_string(),
                created_at: now - chrono::Duration::minutes(5),
            },
            Message {
                id: "msg-2".to_string(),
                conversation_id: "chat-1".to_string(),
                role: MessageRole::Assistant,
                content: "I can help you analyze your data, answer questions, and provide \
                          insights based on the information you provide. Just upload your \
                          data or ask me a question to get started!"
                    .to_string(),
                created_at: now - chrono::Duration::minutes(4),
            },
        ],
    );
    tables.messages.insert(
        "chat-2".to_string(),
        vec![
            Message {
                id: "msg-3".to_string(),
                conversation_id: "chat-2".to_string(),
                role: MessageRole::User,
                content: "Can you analyze this dataset?".to_string(),
                created_at: hour_ago,
            },
            Message {
                id: "msg-4".to_string(),
                conversation_id: "chat-2".to_string(),
                role: MessageRole::Assistant,
                content: "Of course! Please upload your dataset and I'll analyze it for you."
                    .to_string(),
                created_at: hour_ago + chrono::Duration::minutes(1),
            },
        ],
    );

    Arc::new(RwLock::new(tables))
}
