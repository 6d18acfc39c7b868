use async_trait::async_trait;
use chrono::{DateTime, Utc};

use mindflow_types::{
    JournalEntry, MoodEntry, NewJournalEntry, NewMoodEntry, NewThread, Thread, ThreadSummary,
    ThreadUpdate,
};

use crate::error::Result;

/// Upper bound for any listing query
pub const MAX_LIST_LIMIT: i64 = 100;

pub(crate) fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(1, MAX_LIST_LIMIT)
}

/// Storage for conversation threads
///
/// Every operation is scoped to the owning user; a thread owned by someone
/// else behaves exactly like a missing one.
#[async_trait]
pub trait ThreadStore: Send + Sync {
    /// Create an empty thread
    async fn create_thread(&self, owner_id: &str, new: NewThread) -> Result<Thread>;

    /// Get a thread with its full history
    async fn get_thread(&self, owner_id: &str, thread_id: &str) -> Result<Option<Thread>>;

    /// List thread summaries, most recently updated first
    async fn list_threads(&self, owner_id: &str, limit: i64) -> Result<Vec<ThreadSummary>>;

    /// Apply a partial update
    ///
    /// A versioned update is only applied when the stored version is lower,
    /// otherwise it fails with `PersistError::StaleWrite`.
    async fn update_thread(&self, owner_id: &str, thread_id: &str, update: ThreadUpdate)
        -> Result<()>;

    /// Delete a thread and its history
    async fn delete_thread(&self, owner_id: &str, thread_id: &str) -> Result<()>;
}

/// Storage for mood log entries
#[async_trait]
pub trait MoodStore: Send + Sync {
    async fn save_mood(&self, owner_id: &str, entry: NewMoodEntry) -> Result<MoodEntry>;

    /// Entries newest first, optionally only those at or after `since`
    async fn list_moods(
        &self,
        owner_id: &str,
        since: Option<DateTime<Utc>>,
        limit: i64,
    ) -> Result<Vec<MoodEntry>>;
}

/// Storage for journal entries
#[async_trait]
pub trait JournalStore: Send + Sync {
    async fn save_journal(&self, owner_id: &str, entry: NewJournalEntry) -> Result<JournalEntry>;

    /// Entries newest first
    async fn list_journals(&self, owner_id: &str) -> Result<Vec<JournalEntry>>;

    async fn delete_journal(&self, owner_id: &str, journal_id: &str) -> Result<()>;
}
