#[cfg(feature = "mongodb")]
use futures::TryStreamExt;
#[cfg(feature = "mongodb")]
use mongodb::{
    bson::{self, doc, Document},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, Database, IndexModel,
};

#[cfg(feature = "mongodb")]
use mindflow_types::{NewThread, Thread, ThreadUpdate};

#[cfg(feature = "mongodb")]
use crate::dbs::mongo::models::{MongoMessage, MongoThread, MongoThreadSummary};
#[cfg(feature = "mongodb")]
use crate::error::{PersistError, Result};

#[cfg(feature = "mongodb")]
const DUPLICATE_KEY: i32 = 11000;

#[cfg(feature = "mongodb")]
pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

#[cfg(feature = "mongodb")]
#[derive(Clone)]
pub struct MongoThreadRepository {
    collection: Collection<MongoThread>,
}

#[cfg(feature = "mongodb")]
impl MongoThreadRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection("threads");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> Result<()> {
        let unique_thread = IndexModel::builder()
            .keys(doc! { "user_id": 1, "thread_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let by_recency = IndexModel::builder()
            .keys(doc! { "user_id": 1, "updated_at": -1 })
            .build();

        self.collection.create_index(unique_thread).await?;
        self.collection.create_index(by_recency).await?;
        Ok(())
    }

    /// Create a new, empty thread
    pub async fn create_thread(&self, user_id: &str, new: NewThread) -> Result<MongoThread> {
        let thread_id = new.thread_id.clone();
        let thread = MongoThread::from(Thread::new(user_id, new));

        match self.collection.insert_one(&thread).await {
            Ok(_) => Ok(thread),
            Err(e) if is_duplicate_key(&e) => Err(PersistError::ThreadExists(thread_id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Get thread by its client-facing id
    pub async fn get_thread(&self, user_id: &str, thread_id: &str) -> Result<Option<MongoThread>> {
        let filter = doc! { "thread_id": thread_id, "user_id": user_id };
        Ok(self.collection.find_one(filter).await?)
    }

    /// List threads for a user, without their messages
    pub async fn list_threads(&self, user_id: &str, limit: i64) -> Result<Vec<MongoThreadSummary>> {
        let filter = doc! { "user_id": user_id };
        let threads = self
            .collection
            .clone_with_type::<MongoThreadSummary>()
            .find(filter)
            .sort(doc! { "updated_at": -1 })
            .projection(doc! { "thread_id": 1, "title": 1, "created_at": 1, "updated_at": 1, "mood": 1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(threads)
    }

    /// `$set` only the fields present in the update
    pub async fn update_thread(
        &self,
        user_id: &str,
        thread_id: &str,
        update: ThreadUpdate,
    ) -> Result<()> {
        let mut filter = doc! { "thread_id": thread_id, "user_id": user_id };
        let mut set = doc! { "updated_at": bson::DateTime::now() };

        if let Some(title) = update.title {
            set.insert("title", title);
        }
        if let Some(messages) = update.messages {
            let messages: Vec<MongoMessage> = messages.into_iter().map(Into::into).collect();
            set.insert("messages", bson::to_bson(&messages)?);
        }
        if let Some(mood) = update.mood {
            set.insert("mood", mood);
        }
        if let Some(version) = update.version {
            let version = version_to_i64(version);
            filter.insert("save_version", doc! { "$lt": version });
            set.insert("save_version", version);
        }

        let result = self
            .collection
            .update_one(filter, doc! { "$set": set })
            .await?;

        if result.matched_count > 0 {
            return Ok(());
        }

        // A versioned miss on an existing thread means a newer save won
        if let Some(version) = update.version {
            if self.exists(user_id, thread_id).await? {
                return Err(PersistError::StaleWrite {
                    thread_id: thread_id.to_string(),
                    version,
                });
            }
        }

        Err(PersistError::ThreadNotFound(thread_id.to_string()))
    }

    /// Delete thread (history is embedded, so it goes with it)
    pub async fn delete_thread(&self, user_id: &str, thread_id: &str) -> Result<()> {
        let filter = doc! { "thread_id": thread_id, "user_id": user_id };
        let result = self.collection.delete_one(filter).await?;
        if result.deleted_count == 0 {
            return Err(PersistError::ThreadNotFound(thread_id.to_string()));
        }
        Ok(())
    }

    async fn exists(&self, user_id: &str, thread_id: &str) -> Result<bool> {
        let filter: Document = doc! { "thread_id": thread_id, "user_id": user_id };
        Ok(self.collection.count_documents(filter).await? > 0)
    }
}

#[cfg(feature = "mongodb")]
fn version_to_i64(version: u64) -> i64 {
    i64::try_from(version).unwrap_or(i64::MAX)
}
