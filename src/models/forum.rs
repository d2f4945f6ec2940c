use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::contribution::Author;

/// A discussion topic in the Agora
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumTopic {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub messages: Vec<ForumMessage>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ForumTopic {
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Preview text for the topic list, teaser-length
    pub fn summary(&self) -> String {
        crate::utils::truncate(&self.description, 150)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumMessage {
    #[serde(alias = "_id")]
    pub id: String,
    pub content: String,
    pub author: Author,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /forums`
#[derive(Debug, Clone, Serialize)]
pub struct NewTopic {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Request body for `POST /forums/{id}/messages`
#[derive(Debug, Clone, Serialize)]
pub struct NewMessage {
    pub content: String,
}
