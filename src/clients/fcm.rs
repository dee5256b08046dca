use anyhow::{Error, Result, anyhow};
use reqwest::Client;
use tracing::{debug, info};

use crate::{
    config::Config,
    dispatcher::PushSender,
    models::fcm::{FcmMessage, FcmRequest},
};

const MESSAGING_SCOPE: &[&str] = &["https://www.googleapis.com/auth/firebase.messaging"];

pub struct FcmClient {
    http_client: Client,
    project_id: String,
}

impl FcmClient {
    pub fn new(config: &Config) -> Self {
        info!(project_id = %config.firebase_project_id, "FCM client initialized");

        Self {
            http_client: Client::new(),
            project_id: config.firebase_project_id.clone(),
        }
    }

    async fn send_once(&self, request: &FcmRequest) -> Result<(), Error> {
        let provider = gcp_auth::provider().await?;
        let token = provider.token(MESSAGING_SCOPE).await?;

        let url = format!(
            "https://fcm.googleapis.com/v1/projects/{}/messages:send",
            self.project_id
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token.as_str())
            .json(&request)
            .send()
            .await?;

        if response.status().is_success() {
            debug!("FCM push notification sent");
            Ok(())
        } else {
            let error_text = response.text().await?;
            Err(anyhow!("FCM request failed: {}", error_text))
        }
    }
}

impl PushSender for FcmClient {
    /// One shot per recipient. Retry policy, if any, belongs to the
    /// triggering infrastructure.
    async fn send(&self, message: &FcmMessage) -> Result<(), Error> {
        debug!(
            chat_id = %message.data.chat_id,
            "Sending FCM push notification"
        );

        let request = FcmRequest {
            message: message.clone(),
        };

        self.send_once(&request).await
    }
}
