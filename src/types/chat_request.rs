use serde::{Deserialize, Serialize};

use crate::types::SessionToken;

/// Body POSTed to the webhook for one turn.
///
/// Field names follow what an n8n Chat Trigger expects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    /// The trimmed user message.
    #[serde(rename = "chatInput")]
    pub chat_input: String,

    /// Correlates this turn with the rest of the conversation.
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

impl ChatRequest {
    /// Create a new `ChatRequest`.
    pub fn new(chat_input: impl Into<String>, session: &SessionToken) -> Self {
        Self {
            chat_input: chat_input.into(),
            session_id: session.as_str().to_string(),
        }
    }
}
