use anyhow::{Error, Result};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{
    event::MessageCreatedEvent,
    fcm::{FcmMessage, token_is_routable},
    record::{ChatRecord, UserRecord},
};

/// Read-only lookups against the chat backend's document store.
///
/// `Ok(None)` means the document does not exist; `Err` means the store
/// itself could not be reached.
pub trait RecordStore {
    fn get_chat(
        &self,
        chat_id: &str,
    ) -> impl Future<Output = Result<Option<ChatRecord>, Error>> + Send;

    fn get_user(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Option<UserRecord>, Error>> + Send;
}

/// Single-shot push delivery. One call per recipient, no retry.
pub trait PushSender {
    fn send(&self, message: &FcmMessage) -> impl Future<Output = Result<(), Error>> + Send;
}

/// Per-invocation counters, logged at completion. Purely observational;
/// the triggering infrastructure does not consume them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DispatchSummary {
    pub sent: u32,
    pub skipped: u32,
    pub failed: u32,
}

pub struct NotificationDispatcher<S, P> {
    store: S,
    push: P,
}

impl<S, P> NotificationDispatcher<S, P>
where
    S: RecordStore,
    P: PushSender,
{
    pub fn new(store: S, push: P) -> Self {
        Self { store, push }
    }

    /// Notifies every eligible participant of a newly created message,
    /// exactly once each, without letting one recipient's failure block
    /// delivery to the others.
    ///
    /// Missing chat, missing participants, empty recipient set, missing
    /// user, missing token, and active-in-chat suppression are all benign
    /// skips. The only error that propagates is a failed chat lookup: with
    /// no participant list there is no useful work to do.
    pub async fn handle_message_created(
        &self,
        event: &MessageCreatedEvent,
    ) -> Result<DispatchSummary, Error> {
        let trace_id = Uuid::new_v4();
        let mut summary = DispatchSummary::default();

        let Some(data) = event.data.as_ref() else {
            info!(
                %trace_id,
                chat_id = %event.chat_id,
                message_id = %event.message_id,
                "Event carries no message data, nothing to dispatch"
            );
            return Ok(summary);
        };

        let Some(chat) = self.store.get_chat(&event.chat_id).await? else {
            info!(
                %trace_id,
                chat_id = %event.chat_id,
                "Chat not found or has no participants, nothing to dispatch"
            );
            return Ok(summary);
        };

        let recipients = chat.recipients(&data.sender_id);

        if recipients.is_empty() {
            info!(
                %trace_id,
                chat_id = %event.chat_id,
                sender_id = %data.sender_id,
                "No recipients besides the sender, nothing to dispatch"
            );
            return Ok(summary);
        }

        debug!(
            %trace_id,
            chat_id = %event.chat_id,
            recipient_count = recipients.len(),
            "Dispatching notifications"
        );

        for recipient in &recipients {
            match self.notify_recipient(recipient, event).await {
                Outcome::Sent => summary.sent += 1,
                Outcome::Skipped(reason) => {
                    info!(
                        %trace_id,
                        chat_id = %event.chat_id,
                        user_id = %recipient,
                        reason,
                        "Recipient skipped"
                    );
                    summary.skipped += 1;
                }
                Outcome::Failed(e) => {
                    warn!(
                        %trace_id,
                        chat_id = %event.chat_id,
                        user_id = %recipient,
                        error = %e,
                        "Push delivery failed, continuing with remaining recipients"
                    );
                    summary.failed += 1;
                }
            }
        }

        info!(
            %trace_id,
            chat_id = %event.chat_id,
            sent = summary.sent,
            skipped = summary.skipped,
            failed = summary.failed,
            "Dispatch complete"
        );

        Ok(summary)
    }

    async fn notify_recipient(&self, user_id: &str, event: &MessageCreatedEvent) -> Outcome {
        let user = match self.store.get_user(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return Outcome::Skipped("user not found"),
            Err(e) => {
                warn!(user_id, error = %e, "User lookup failed");
                return Outcome::Skipped("user lookup failed");
            }
        };

        let Some(token) = user.fcm_token.as_deref() else {
            return Outcome::Skipped("no device token");
        };

        if !token_is_routable(token) {
            return Outcome::Skipped("unroutable device token");
        }

        if user.active_in_chat_id.as_deref() == Some(event.chat_id.as_str()) {
            return Outcome::Skipped("recipient is viewing this chat");
        }

        let Some(message) = FcmMessage::for_recipient(token, event) else {
            return Outcome::Skipped("event carries no message data");
        };

        match self.push.send(&message).await {
            Ok(()) => Outcome::Sent,
            Err(e) => Outcome::Failed(e),
        }
    }
}

enum Outcome {
    Sent,
    Skipped(&'static str),
    Failed(Error),
}
