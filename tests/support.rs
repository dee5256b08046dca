use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU32, Ordering},
    },
};

use anyhow::{Error, Result, anyhow};
use push_dispatcher::{
    dispatcher::{PushSender, RecordStore},
    models::{
        fcm::FcmMessage,
        record::{ChatRecord, UserRecord},
    },
};

/// In-memory stand-in for the chat backend's document store.
#[derive(Clone, Default)]
pub struct MockStore {
    chats: HashMap<String, ChatRecord>,
    users: HashMap<String, UserRecord>,
    fail_chat_lookup: bool,
    fail_user_lookups: Vec<String>,
    pub chat_lookups: Arc<AtomicU32>,
    pub user_lookups: Arc<AtomicU32>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chat(mut self, chat_id: &str, participants: &[&str]) -> Self {
        self.chats.insert(
            chat_id.to_string(),
            ChatRecord {
                participants: participants.iter().map(|s| s.to_string()).collect(),
            },
        );
        self
    }

    pub fn with_user(
        mut self,
        user_id: &str,
        fcm_token: Option<&str>,
        active_in_chat_id: Option<&str>,
    ) -> Self {
        self.users.insert(
            user_id.to_string(),
            UserRecord {
                fcm_token: fcm_token.map(|s| s.to_string()),
                active_in_chat_id: active_in_chat_id.map(|s| s.to_string()),
            },
        );
        self
    }

    pub fn with_failing_chat_lookup(mut self) -> Self {
        self.fail_chat_lookup = true;
        self
    }

    pub fn with_failing_user_lookup(mut self, user_id: &str) -> Self {
        self.fail_user_lookups.push(user_id.to_string());
        self
    }
}

impl RecordStore for MockStore {
    async fn get_chat(&self, chat_id: &str) -> Result<Option<ChatRecord>, Error> {
        self.chat_lookups.fetch_add(1, Ordering::SeqCst);

        if self.fail_chat_lookup {
            return Err(anyhow!("Document store unavailable"));
        }

        Ok(self.chats.get(chat_id).cloned())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, Error> {
        self.user_lookups.fetch_add(1, Ordering::SeqCst);

        if self.fail_user_lookups.iter().any(|uid| uid == user_id) {
            return Err(anyhow!("Document store unavailable"));
        }

        Ok(self.users.get(user_id).cloned())
    }
}

/// Push sender that records every accepted message and can be told to
/// reject deliveries for specific device tokens.
#[derive(Clone, Default)]
pub struct MockPush {
    fail_tokens: Vec<String>,
    pub attempts: Arc<AtomicU32>,
    pub sent: Arc<Mutex<Vec<FcmMessage>>>,
}

impl MockPush {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(mut self, token: &str) -> Self {
        self.fail_tokens.push(token.to_string());
        self
    }

    pub fn sent_tokens(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|m| m.token.clone())
            .collect()
    }
}

impl PushSender for MockPush {
    async fn send(&self, message: &FcmMessage) -> Result<(), Error> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if self.fail_tokens.contains(&message.token) {
            return Err(anyhow!("Delivery rejected for token"));
        }

        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
