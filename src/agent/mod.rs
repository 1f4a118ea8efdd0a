use crate::errors::AppError;
use crate::models::{Message, MessageRole};

const CANNED_REPLY: &str =
    "I've received your message and I'm processing it. Here's what I can tell you: \
     This is a simulated response for demonstration purposes. In a real application, \
     this would be an actual response from the AI model based on your input.";

/// Stands in for a model backend. The seam matches a real agent client
/// (conversation id and replayed history in, an assistant [`Message`] out)
/// but the reply is canned: only its role and position in the transcript are
/// contractual.
#[derive(Clone, Default)]
pub struct SimulatedAgentService;

impl SimulatedAgentService {
    pub fn new() -> Self {
        Self
    }

    /// Produces the assistant turn for `conversation_id`. `history` and
    /// `user_message` are accepted for parity with a real client; they do not
    /// influence the canned reply.
    pub async fn chat(
        &self,
        conversation_id: &str,
        _history: &[Message],
        _user_message: &str,
    ) -> Result<Message, AppError> {
        Ok(Message::new(
            conversation_id.to_string(),
            MessageRole::Assistant,
            CANNED_REPLY.to_string(),
        ))
    }
}
