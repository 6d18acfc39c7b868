use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use mindflow_types::{
    JournalEntry, MoodEntry, NewJournalEntry, NewMoodEntry, NewThread, Thread, ThreadSummary,
    ThreadUpdate,
};

use crate::error::{PersistError, Result};
use crate::trait_client::{clamp_limit, JournalStore, MoodStore, ThreadStore};

type ThreadKey = (String, String);

/// Process-local store with the same semantics as the MongoDB client
///
/// Used for local development without a database and throughout the tests.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    threads: Arc<RwLock<HashMap<ThreadKey, Thread>>>,
    moods: Arc<RwLock<Vec<MoodEntry>>>,
    journals: Arc<RwLock<Vec<JournalEntry>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn key(owner_id: &str, thread_id: &str) -> ThreadKey {
    (owner_id.to_string(), thread_id.to_string())
}

#[async_trait]
impl ThreadStore for InMemoryStore {
    async fn create_thread(&self, owner_id: &str, new: NewThread) -> Result<Thread> {
        new.validate()?;
        let mut threads = self.threads.write().await;
        let key = key(owner_id, &new.thread_id);
        if threads.contains_key(&key) {
            return Err(PersistError::ThreadExists(new.thread_id));
        }

        let thread = Thread::new(owner_id, new);
        threads.insert(key, thread.clone());
        Ok(thread)
    }

    async fn get_thread(&self, owner_id: &str, thread_id: &str) -> Result<Option<Thread>> {
        let threads = self.threads.read().await;
        Ok(threads.get(&key(owner_id, thread_id)).cloned())
    }

    async fn list_threads(&self, owner_id: &str, limit: i64) -> Result<Vec<ThreadSummary>> {
        let threads = self.threads.read().await;
        let mut summaries: Vec<ThreadSummary> = threads
            .values()
            .filter(|t| t.owner_id == owner_id)
            .map(Thread::summary)
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        summaries.truncate(clamp_limit(limit) as usize);
        Ok(summaries)
    }

    async fn update_thread(
        &self,
        owner_id: &str,
        thread_id: &str,
        update: ThreadUpdate,
    ) -> Result<()> {
        let mut threads = self.threads.write().await;
        let thread = threads
            .get_mut(&key(owner_id, thread_id))
            .ok_or_else(|| PersistError::ThreadNotFound(thread_id.to_string()))?;

        if let Some(version) = update.version {
            if version <= thread.save_version {
                return Err(PersistError::StaleWrite {
                    thread_id: thread_id.to_string(),
                    version,
                });
            }
        }

        thread.apply(update);
        Ok(())
    }

    async fn delete_thread(&self, owner_id: &str, thread_id: &str) -> Result<()> {
        let mut threads = self.threads.write().await;
        threads
            .remove(&key(owner_id, thread_id))
            .map(|_| ())
            .ok_or_else(|| PersistError::ThreadNotFound(thread_id.to_string()))
    }
}

#[async_trait]
impl MoodStore for InMemoryStore {
    async fn save_mood(&self, owner_id: &str, entry: NewMoodEntry) -> Result<MoodEntry> {
        let entry = entry.into_entry(owner_id)?;
        self.moods.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn list_moods(
        &self,
        owner_id: &str,
        since: Option<DateTime<Utc>>,
        limit: i64,
    ) -> Result<Vec<MoodEntry>> {
        let moods = self.moods.read().await;
        let mut entries: Vec<MoodEntry> = moods
            .iter()
            .filter(|m| m.owner_id == owner_id)
            .filter(|m| since.map_or(true, |since| m.timestamp >= since))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(clamp_limit(limit) as usize);
        Ok(entries)
    }
}

#[async_trait]
impl JournalStore for InMemoryStore {
    async fn save_journal(&self, owner_id: &str, entry: NewJournalEntry) -> Result<JournalEntry> {
        let entry = entry.into_entry(owner_id)?;
        self.journals.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn list_journals(&self, owner_id: &str) -> Result<Vec<JournalEntry>> {
        let journals = self.journals.read().await;
        let mut entries: Vec<JournalEntry> = journals
            .iter()
            .filter(|j| j.owner_id == owner_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    async fn delete_journal(&self, owner_id: &str, journal_id: &str) -> Result<()> {
        let mut journals = self.journals.write().await;
        let before = journals.len();
        journals.retain(|j| !(j.owner_id == owner_id && j.id == journal_id));
        if journals.len() == before {
            return Err(PersistError::JournalNotFound(journal_id.to_string()));
        }
        Ok(())
    }
}
