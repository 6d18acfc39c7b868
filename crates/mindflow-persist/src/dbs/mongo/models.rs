#[cfg(feature = "mongodb")]
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
#[cfg(feature = "mongodb")]
use chrono::{DateTime, Utc};
#[cfg(feature = "mongodb")]
use mongodb::bson::oid::ObjectId;
#[cfg(feature = "mongodb")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "mongodb")]
use mindflow_types::{
    JournalEntry, Message, MessageRole, Mood, MoodEntry, Thread, ThreadSummary,
};

/// MongoDB document for a thread (history embedded, oldest first)
#[cfg(feature = "mongodb")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoThread {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub thread_id: String,
    pub user_id: String,
    pub title: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub messages: Vec<MongoMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default)]
    pub save_version: i64,
}

/// Listing projection of `MongoThread`
#[cfg(feature = "mongodb")]
#[derive(Debug, Clone, Deserialize)]
pub struct MongoThreadSummary {
    pub thread_id: String,
    pub title: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub mood: Option<String>,
}

#[cfg(feature = "mongodb")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}

#[cfg(feature = "mongodb")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoMood {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    pub id: String,
    pub user_id: String,
    pub mood: Mood,
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

#[cfg(feature = "mongodb")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoJournal {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
    pub source: String,
}

// Conversions between database-agnostic and MongoDB-specific models

#[cfg(feature = "mongodb")]
impl From<Message> for MongoMessage {
    fn from(msg: Message) -> Self {
        Self {
            id: msg.id,
            role: msg.role,
            content: msg.content,
            timestamp: msg.timestamp,
        }
    }
}

#[cfg(feature = "mongodb")]
impl From<MongoMessage> for Message {
    fn from(msg: MongoMessage) -> Self {
        Self {
            id: msg.id,
            role: msg.role,
            content: msg.content,
            timestamp: msg.timestamp,
        }
    }
}

#[cfg(feature = "mongodb")]
impl From<Thread> for MongoThread {
    fn from(thread: Thread) -> Self {
        Self {
            id: None,
            thread_id: thread.thread_id,
            user_id: thread.owner_id,
            title: thread.title,
            created_at: thread.created_at,
            updated_at: thread.updated_at,
            messages: thread.messages.into_iter().map(Into::into).collect(),
            mood: thread.mood,
            save_version: i64::try_from(thread.save_version).unwrap_or(i64::MAX),
        }
    }
}

#[cfg(feature = "mongodb")]
impl From<MongoThread> for Thread {
    fn from(thread: MongoThread) -> Self {
        Self {
            thread_id: thread.thread_id,
            owner_id: thread.user_id,
            title: thread.title,
            created_at: thread.created_at,
            updated_at: thread.updated_at,
            messages: thread.messages.into_iter().map(Into::into).collect(),
            mood: thread.mood,
            save_version: u64::try_from(thread.save_version).unwrap_or(0),
        }
    }
}

#[cfg(feature = "mongodb")]
impl From<MongoThreadSummary> for ThreadSummary {
    fn from(summary: MongoThreadSummary) -> Self {
        Self {
            thread_id: summary.thread_id,
            title: summary.title,
            created_at: summary.created_at,
            updated_at: summary.updated_at,
            mood: summary.mood,
        }
    }
}

#[cfg(feature = "mongodb")]
impl From<MoodEntry> for MongoMood {
    fn from(entry: MoodEntry) -> Self {
        Self {
            object_id: None,
            id: entry.id,
            user_id: entry.owner_id,
            mood: entry.mood,
            emotions: entry.emotions,
            triggers: entry.triggers,
            note: entry.note,
            timestamp: entry.timestamp,
            thread_id: entry.thread_id,
        }
    }
}

#[cfg(feature = "mongodb")]
impl From<MongoMood> for MoodEntry {
    fn from(doc: MongoMood) -> Self {
        Self {
            id: doc.id,
            owner_id: doc.user_id,
            mood: doc.mood,
            emotions: doc.emotions,
            triggers: doc.triggers,
            note: doc.note,
            timestamp: doc.timestamp,
            thread_id: doc.thread_id,
        }
    }
}

#[cfg(feature = "mongodb")]
impl From<JournalEntry> for MongoJournal {
    fn from(entry: JournalEntry) -> Self {
        Self {
            object_id: None,
            id: entry.id,
            user_id: entry.owner_id,
            title: entry.title,
            content: entry.content,
            mood: entry.mood,
            tags: entry.tags,
            timestamp: entry.timestamp,
            source: entry.source,
        }
    }
}

#[cfg(feature = "mongodb")]
impl From<MongoJournal> for JournalEntry {
    fn from(doc: MongoJournal) -> Self {
        Self {
            id: doc.id,
            owner_id: doc.user_id,
            title: doc.title,
            content: doc.content,
            mood: doc.mood,
            tags: doc.tags,
            timestamp: doc.timestamp,
            source: doc.source,
        }
    }
}

#[cfg(all(test, feature = "mongodb"))]
mod tests {
    use super::*;
    use mindflow_types::NewThread;

    #[test]
    fn test_thread_document_roundtrip_keeps_history() {
        let mut thread = Thread::new("owner", NewThread::new("t1").with_title("Hello"));
        thread.messages.push(Message::user("m1", "Hi"));
        thread.save_version = 4;

        let doc = bson::to_document(&MongoThread::from(thread.clone())).unwrap();
        assert!(doc.get_datetime("created_at").is_ok());
        assert_eq!(doc.get_i64("save_version").unwrap(), 4);
        assert!(!doc.contains_key("_id"));

        let back: MongoThread = bson::from_document(doc).unwrap();
        let back = Thread::from(back);
        // BSON dates are millisecond precision, so compare the payload only
        assert_eq!(back.messages.len(), 1);
        assert_eq!(back.messages[0].id, "m1");
        assert_eq!(back.messages[0].content, "Hi");
        assert_eq!(back.owner_id, "owner");
        assert_eq!(back.save_version, 4);
    }
}
