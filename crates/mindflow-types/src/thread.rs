use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::message::Message;

pub const DEFAULT_THREAD_TITLE: &str = "New Conversation";

/// A persisted conversation and its ordered history (oldest first)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub thread_id: String,
    pub owner_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    /// Version stamp of the last applied history save
    #[serde(default)]
    pub save_version: u64,
}

impl Thread {
    pub fn new(owner_id: impl Into<String>, new: NewThread) -> Self {
        let now = Utc::now();
        Self {
            thread_id: new.thread_id,
            owner_id: owner_id.into(),
            title: new.title.unwrap_or_else(|| DEFAULT_THREAD_TITLE.to_string()),
            created_at: now,
            updated_at: now,
            messages: Vec::new(),
            mood: None,
            save_version: 0,
        }
    }

    /// Apply a partial update in place. Version checks are the store's job.
    pub fn apply(&mut self, update: ThreadUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(messages) = update.messages {
            self.messages = messages;
        }
        if let Some(mood) = update.mood {
            self.mood = Some(mood);
        }
        if let Some(version) = update.version {
            self.save_version = version;
        }
        self.updated_at = Utc::now();
    }

    pub fn summary(&self) -> ThreadSummary {
        ThreadSummary {
            thread_id: self.thread_id.clone(),
            title: self.title.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            mood: self.mood.clone(),
        }
    }
}

/// Listing projection of a thread (no messages)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSummary {
    pub thread_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
}

/// Request to create an empty thread
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewThread {
    #[serde(default)]
    pub thread_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl NewThread {
    pub fn new(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.thread_id.trim().is_empty() {
            return Err(ValidationError::MissingField("threadId"));
        }
        Ok(())
    }
}

/// Partial update of a thread; only present fields are written
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    /// When set, the update only applies if the stored version is lower
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

impl ThreadUpdate {
    pub fn messages(messages: Vec<Message>) -> Self {
        Self {
            messages: Some(messages),
            ..Default::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_version(mut self, version: u64) -> Self {
        self.version = Some(version);
        self
    }
}
