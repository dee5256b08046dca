use serde::{Deserialize, Serialize};

/// Event emitted by the chat backend when a message document is created
/// under `chats/{chatId}/messages/{messageId}`.
///
/// `data` carries the created document's fields and may be absent when the
/// trigger fires on an empty write; that case is a no-op, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCreatedEvent {
    pub chat_id: String,
    pub message_id: String,

    #[serde(default)]
    pub data: Option<MessageData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageData {
    pub sender_id: String,

    #[serde(default)]
    pub sender_name: Option<String>,

    #[serde(default)]
    pub content: Option<String>,
}
