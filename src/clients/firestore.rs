use anyhow::{Error, Result, anyhow};
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use crate::{
    config::Config,
    dispatcher::RecordStore,
    models::{
        firestore::FirestoreDocument,
        record::{ChatRecord, UserRecord},
    },
};

const DATASTORE_SCOPE: &[&str] = &["https://www.googleapis.com/auth/datastore"];

/// Read-only Firestore REST client for the chat backend's documents.
/// Chats live at `chats/{chatId}`, users at `users/{uid}`.
pub struct FirestoreClient {
    http_client: Client,
    project_id: String,
}

impl FirestoreClient {
    pub fn new(config: &Config) -> Self {
        info!(project_id = %config.firebase_project_id, "Firestore client initialized");

        Self {
            http_client: Client::new(),
            project_id: config.firebase_project_id.clone(),
        }
    }

    fn document_url(&self, path: &str) -> String {
        format!(
            "https://firestore.googleapis.com/v1/projects/{}/databases/(default)/documents/{}",
            self.project_id, path
        )
    }

    async fn fetch_document(&self, path: &str) -> Result<Option<FirestoreDocument>, Error> {
        let provider = gcp_auth::provider().await?;
        let token = provider.token(DATASTORE_SCOPE).await?;

        let response = self
            .http_client
            .get(self.document_url(path))
            .bearer_auth(token.as_str())
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(path, "Document not found");
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Firestore read of {} failed with {}: {}",
                path,
                status,
                error_text
            ));
        }

        let document = response.json::<FirestoreDocument>().await?;
        Ok(Some(document))
    }

    pub async fn ping(&self) -> Result<(), Error> {
        let provider = gcp_auth::provider().await?;
        let token = provider.token(DATASTORE_SCOPE).await?;

        let url = format!(
            "https://firestore.googleapis.com/v1/projects/{}/databases/(default)",
            self.project_id
        );

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token.as_str())
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(anyhow!("Firestore ping failed: {}", response.status()))
        }
    }
}

impl RecordStore for FirestoreClient {
    async fn get_chat(&self, chat_id: &str) -> Result<Option<ChatRecord>, Error> {
        let path = format!("chats/{}", chat_id);

        let Some(document) = self.fetch_document(&path).await? else {
            return Ok(None);
        };

        Ok(document.into_chat_record())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, Error> {
        let path = format!("users/{}", user_id);

        let Some(document) = self.fetch_document(&path).await? else {
            return Ok(None);
        };

        Ok(Some(document.into_user_record()))
    }
}
