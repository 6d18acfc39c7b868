#[cfg(feature = "mongodb")]
use std::sync::Arc;

#[cfg(feature = "mongodb")]
use async_trait::async_trait;
#[cfg(feature = "mongodb")]
use chrono::{DateTime, Utc};
#[cfg(feature = "mongodb")]
use mongodb::bson::doc;

#[cfg(feature = "mongodb")]
use mindflow_types::{
    JournalEntry, MoodEntry, NewJournalEntry, NewMoodEntry, NewThread, Thread, ThreadSummary,
    ThreadUpdate,
};

#[cfg(feature = "mongodb")]
use crate::dbs::mongo::pool::MongoPool;
#[cfg(feature = "mongodb")]
use crate::dbs::mongo::repositories::{
    MongoJournalRepository, MongoMoodRepository, MongoThreadRepository,
};
#[cfg(feature = "mongodb")]
use crate::error::Result;
#[cfg(feature = "mongodb")]
use crate::trait_client::{clamp_limit, JournalStore, MoodStore, ThreadStore};

#[cfg(feature = "mongodb")]
pub struct MongoPersistenceClient {
    pool: Arc<MongoPool>,
    thread_repo: MongoThreadRepository,
    mood_repo: MongoMoodRepository,
    journal_repo: MongoJournalRepository,
}

#[cfg(feature = "mongodb")]
impl MongoPersistenceClient {
    /// Build the client on top of a shared pool (connects if needed)
    pub async fn connect(pool: Arc<MongoPool>) -> Result<Self> {
        let db = pool.database().await?;

        Ok(Self {
            thread_repo: MongoThreadRepository::new(&db),
            mood_repo: MongoMoodRepository::new(&db),
            journal_repo: MongoJournalRepository::new(&db),
            pool,
        })
    }

    pub async fn ensure_indexes(&self) -> Result<()> {
        self.thread_repo.ensure_indexes().await?;
        self.mood_repo.ensure_indexes().await?;
        self.journal_repo.ensure_indexes().await?;
        Ok(())
    }

    /// Round-trip a `ping` to the server
    pub async fn ping(&self) -> Result<()> {
        self.pool
            .database()
            .await?
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    pub fn pool(&self) -> &MongoPool {
        &self.pool
    }
}

#[cfg(feature = "mongodb")]
#[async_trait]
impl ThreadStore for MongoPersistenceClient {
    async fn create_thread(&self, owner_id: &str, new: NewThread) -> Result<Thread> {
        new.validate()?;
        let thread = self.thread_repo.create_thread(owner_id, new).await?;
        Ok(thread.into())
    }

    async fn get_thread(&self, owner_id: &str, thread_id: &str) -> Result<Option<Thread>> {
        let thread = self.thread_repo.get_thread(owner_id, thread_id).await?;
        Ok(thread.map(Into::into))
    }

    async fn list_threads(&self, owner_id: &str, limit: i64) -> Result<Vec<ThreadSummary>> {
        let threads = self
            .thread_repo
            .list_threads(owner_id, clamp_limit(limit))
            .await?;
        Ok(threads.into_iter().map(Into::into).collect())
    }

    async fn update_thread(
        &self,
        owner_id: &str,
        thread_id: &str,
        update: ThreadUpdate,
    ) -> Result<()> {
        self.thread_repo
            .update_thread(owner_id, thread_id, update)
            .await
    }

    async fn delete_thread(&self, owner_id: &str, thread_id: &str) -> Result<()> {
        self.thread_repo.delete_thread(owner_id, thread_id).await
    }
}

#[cfg(feature = "mongodb")]
#[async_trait]
impl MoodStore for MongoPersistenceClient {
    async fn save_mood(&self, owner_id: &str, entry: NewMoodEntry) -> Result<MoodEntry> {
        let entry = entry.into_entry(owner_id)?;
        self.mood_repo.save_mood(entry.clone().into()).await?;
        Ok(entry)
    }

    async fn list_moods(
        &self,
        owner_id: &str,
        since: Option<DateTime<Utc>>,
        limit: i64,
    ) -> Result<Vec<MoodEntry>> {
        let moods = self
            .mood_repo
            .list_moods(owner_id, since, clamp_limit(limit))
            .await?;
        Ok(moods.into_iter().map(Into::into).collect())
    }
}

#[cfg(feature = "mongodb")]
#[async_trait]
impl JournalStore for MongoPersistenceClient {
    async fn save_journal(&self, owner_id: &str, entry: NewJournalEntry) -> Result<JournalEntry> {
        let entry = entry.into_entry(owner_id)?;
        self.journal_repo.save_journal(entry.clone().into()).await?;
        Ok(entry)
    }

    async fn list_journals(&self, owner_id: &str) -> Result<Vec<JournalEntry>> {
        let journals = self.journal_repo.list_journals(owner_id).await?;
        Ok(journals.into_iter().map(Into::into).collect())
    }

    async fn delete_journal(&self, owner_id: &str, journal_id: &str) -> Result<()> {
        self.journal_repo.delete_journal(owner_id, journal_id).await
    }
}
