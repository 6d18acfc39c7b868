use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::mood::Mood;

pub const DEFAULT_JOURNAL_TITLE: &str = "Untitled Entry";
pub const DEFAULT_JOURNAL_SOURCE: &str = "journal-page";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub source: String,
}

/// Journal form submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJournalEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Where the entry was written (journal page, chat component, ...)
    #[serde(default)]
    pub source: Option<String>,
}

impl NewJournalEntry {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn into_entry(self, owner_id: impl Into<String>) -> Result<JournalEntry, ValidationError> {
        if self.content.trim().is_empty() {
            return Err(ValidationError::MissingField("content"));
        }

        Ok(JournalEntry {
            id: crate::ids::prefixed_id("journal"),
            owner_id: owner_id.into(),
            title: self
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_JOURNAL_TITLE.to_string()),
            content: self.content,
            mood: self.mood,
            tags: self.tags,
            timestamp: Utc::now(),
            source: self
                .source
                .unwrap_or_else(|| DEFAULT_JOURNAL_SOURCE.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_content_rejected() {
        let err = NewJournalEntry::new("   ").into_entry("u1").unwrap_err();
        assert!(matches!(err, ValidationError::MissingField("content")));
    }

    #[test]
    fn test_defaults_applied() {
        let entry = NewJournalEntry::new("Slept well").into_entry("u1").unwrap();
        assert_eq!(entry.title, DEFAULT_JOURNAL_TITLE);
        assert_eq!(entry.source, DEFAULT_JOURNAL_SOURCE);
        assert!(entry.id.starts_with("journal_"));
    }
}
