use serde::{Deserialize, Serialize};

use crate::models::event::MessageCreatedEvent;

pub const DEFAULT_SENDER_NAME: &str = "Someone";
pub const DEFAULT_CONTENT: &str = "New message";

/// Whether a stored device token has a shape FCM can route. Tokens outside
/// these bounds get the same skip treatment as a missing token; FCM would
/// only reject them per recipient anyway.
pub fn token_is_routable(token: &str) -> bool {
    const MIN_TOKEN_LEN: usize = 20;
    const MAX_TOKEN_LEN: usize = 200;

    (MIN_TOKEN_LEN..=MAX_TOKEN_LEN).contains(&token.len())
        && token
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '.'))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcmRequest {
    pub message: FcmMessage,
}

/// Data-only FCM v1 message. The client app renders the notification itself
/// and uses `data.chatId` to deep-link into the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FcmMessage {
    pub token: String,
    pub data: NotificationData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    pub sender_name: String,
    pub content: String,
    pub chat_id: String,
}

impl FcmMessage {
    /// Builds the payload for one recipient, substituting fixed defaults for
    /// an absent sender name or body (e.g. non-text messages).
    pub fn for_recipient(token: &str, event: &MessageCreatedEvent) -> Option<Self> {
        let data = event.data.as_ref()?;

        Some(Self {
            token: token.to_string(),
            data: NotificationData {
                sender_name: data
                    .sender_name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string()),
                content: data
                    .content
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CONTENT.to_string()),
                chat_id: event.chat_id.clone(),
            },
        })
    }
}
