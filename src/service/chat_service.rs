use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::error;
use uuid::Uuid;

use crate::agent::SimulatedAgentService;
use crate::errors::AppError;
use crate::latency::Latency;
use crate::models::{ChatRequest, ChatResponse, Conversation, Message, MessageRole};
use crate::store::conversation_repository::ConversationRepository;
use crate::store::message_repository::MessageRepository;

const MAX_MESSAGE_LENGTH: usize = 8000;
const MAX_TITLE_CHARS: usize = 30;

/// Derives a directory title from the first message of a conversation:
/// the first 30 characters, with a `...` marker when truncated.
fn derive_title(content: &str) -> String {
    let trimmed = content.trim();
    if trimmed.chars().count() > MAX_TITLE_CHARS {
        format!("{}...", trimmed.chars().take(MAX_TITLE_CHARS).collect::<String>())
    } else {
        trimmed.to_string()
    }
}

#[derive(Clone)]
pub struct ChatService {
    conversation_repo: ConversationRepository,
    message_repo: MessageRepository,
    agent: SimulatedAgentService,
    latency: Latency,
    /// Serializes the multi-step write paths (send, cascade delete) so two
    /// in-flight requests can never interleave a user/assistant pair with a
    /// concurrent mutation of the same conversation.
    write_gate: Arc<Mutex<()>>,
}

impl ChatService {
    pub fn new(
        conversation_repo: ConversationRepository,
        message_repo: MessageRepository,
        agent: SimulatedAgentService,
        latency: Latency,
    ) -> Self {
        Self {
            conversation_repo,
            message_repo,
            agent,
            latency,
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    /// All conversations, most recently updated first.
    pub async fn get_conversations(&self) -> Vec<Conversation> {
        self.latency.wait(self.latency.list).await;
        self.conversation_repo.find_all().await
    }

    /// Transcript for a conversation, ascending by creation time. An unknown
    /// id yields an empty transcript rather than an error; the client treats
    /// "no messages" as the new-chat placeholder state.
    pub async fn get_messages(&self, conversation_id: &str) -> Vec<Message> {
        self.latency.wait(self.latency.transcript).await;
        self.message_repo.find_by_conversation_id(conversation_id).await
    }

    /// One chat turn: appends the user message and the synthesized assistant
    /// reply, creating the conversation first when no id was supplied.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, AppError> {
        // ── Validation ────────────────────────────────────────────────────────
        if request.message.trim().is_empty() {
            return Err(AppError::empty_field("message"));
        }
        if request.message.len() > MAX_MESSAGE_LENGTH {
            return Err(AppError::FieldTooLong {
                field_name: "message".to_string(),
                max_length: MAX_MESSAGE_LENGTH,
                actual_length: request.message.len(),
            });
        }

        self.latency.wait(self.latency.send).await;
        let _serialized = self.write_gate.lock().await;

        // ── Resolve or create conversation ────────────────────────────────────
        let conversation_id = request
            .conversation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        if self.conversation_repo.find_by_id(&conversation_id).await.is_none() {
            let conversation = Conversation::new(
                conversation_id.clone(),
                derive_title(&request.message),
                request.message.clone(),
            );
            self.conversation_repo.save(&conversation).await;
        }

        // ── Append user message ───────────────────────────────────────────────
        let user_message = Message::new(
            conversation_id.clone(),
            MessageRole::User,
            request.message.clone(),
        );
        self.message_repo.save(&user_message).await;

        // ── History for the agent (excludes the just-saved user message) ──────
        let history: Vec<Message> = self
            .message_repo
            .find_by_conversation_id(&conversation_id)
            .await
            .into_iter()
            .filter(|m| m.id != user_message.id)
            .collect();

        let assistant_message = self
            .agent
            .chat(&conversation_id, &history, &request.message)
            .await?;
        self.message_repo.save(&assistant_message).await;

        // ── Bump the directory entry ──────────────────────────────────────────
        if let Err(e) = self
            .conversation_repo
            .touch(&conversation_id, &request.message)
            .await
        {
            error!("Failed to update conversation after send: {e}");
        }

        Ok(ChatResponse { conversation_id, user_message, assistant_message })
    }

    /// Rename a conversation. The new title must be non-empty after trimming;
    /// unknown ids fail.
    pub async fn rename_conversation(
        &self,
        conversation_id: &str,
        new_title: &str,
    ) -> Result<Conversation, AppError> {
        let title = new_title.trim();
        if title.is_empty() {
            return Err(AppError::empty_field("title"));
        }

        self.latency.wait(self.latency.mutate).await;
        self.conversation_repo.rename(conversation_id, title).await
    }

    /// Delete a conversation and its messages. Unknown ids fail, so a second
    /// delete of the same id fails too.
    pub async fn delete_conversation(&self, conversation_id: &str) -> Result<(), AppError> {
        self.latency.wait(self.latency.mutate).await;
        let _serialized = self.write_gate.lock().await;
        self.conversation_repo.delete(conversation_id).await
    }
}

#[cfg(test)]
#[path = "chat_service_test.rs"]
mod tests;
