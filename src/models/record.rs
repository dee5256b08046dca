/// Read-only view of a chat document. Owned and mutated entirely by the
/// chat backend; this service only looks up the participant list.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRecord {
    pub participants: Vec<String>,
}

impl ChatRecord {
    /// Recipients for a message: every participant except the sender.
    pub fn recipients(&self, sender_id: &str) -> Vec<String> {
        self.participants
            .iter()
            .filter(|uid| uid.as_str() != sender_id)
            .cloned()
            .collect()
    }
}

/// Read-only view of a user document, looked up once per recipient.
///
/// A missing `fcm_token` means the user cannot be notified. A set
/// `active_in_chat_id` names the chat the user is currently viewing and
/// suppresses pushes for that chat.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserRecord {
    pub fcm_token: Option<String>,
    pub active_in_chat_id: Option<String>,
}
