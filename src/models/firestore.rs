use std::collections::HashMap;

use serde::Deserialize;

use crate::models::record::{ChatRecord, UserRecord};

/// Minimal slice of the Firestore REST v1 document encoding: typed values
/// wrapped in `stringValue`/`arrayValue` under a `fields` map. Only the
/// shapes this service reads are modelled.
#[derive(Debug, Clone, Deserialize)]
pub struct FirestoreDocument {
    #[serde(default)]
    pub fields: HashMap<String, FirestoreValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirestoreValue {
    #[serde(default)]
    pub string_value: Option<String>,

    #[serde(default)]
    pub array_value: Option<FirestoreArray>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FirestoreArray {
    #[serde(default)]
    pub values: Vec<FirestoreValue>,
}

impl FirestoreDocument {
    fn string_field(&self, name: &str) -> Option<String> {
        self.fields.get(name)?.string_value.clone()
    }

    /// A chat document without a `participants` array is treated as not
    /// found: there is no audience to notify.
    pub fn into_chat_record(self) -> Option<ChatRecord> {
        let array = self.fields.get("participants")?.array_value.as_ref()?;

        let participants = array
            .values
            .iter()
            .filter_map(|value| value.string_value.clone())
            .collect();

        Some(ChatRecord { participants })
    }

    pub fn into_user_record(self) -> UserRecord {
        UserRecord {
            fcm_token: self.string_field("fcmToken"),
            active_in_chat_id: self.string_field("activeInChatId"),
        }
    }
}
