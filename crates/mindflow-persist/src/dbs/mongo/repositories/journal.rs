#[cfg(feature = "mongodb")]
use futures::TryStreamExt;
#[cfg(feature = "mongodb")]
use mongodb::{bson::doc, Collection, Database, IndexModel};

#[cfg(feature = "mongodb")]
use crate::dbs::mongo::models::MongoJournal;
#[cfg(feature = "mongodb")]
use crate::error::{PersistError, Result};

#[cfg(feature = "mongodb")]
#[derive(Clone)]
pub struct MongoJournalRepository {
    collection: Collection<MongoJournal>,
}

#[cfg(feature = "mongodb")]
impl MongoJournalRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection("journals");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "timestamp": -1 })
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }

    pub async fn save_journal(&self, journal: MongoJournal) -> Result<()> {
        self.collection.insert_one(&journal).await?;
        Ok(())
    }

    /// Newest first
    pub async fn list_journals(&self, user_id: &str) -> Result<Vec<MongoJournal>> {
        let journals = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "timestamp": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(journals)
    }

    pub async fn delete_journal(&self, user_id: &str, journal_id: &str) -> Result<()> {
        let result = self
            .collection
            .delete_one(doc! { "id": journal_id, "user_id": user_id })
            .await?;
        if result.deleted_count == 0 {
            return Err(PersistError::JournalNotFound(journal_id.to_string()));
        }
        Ok(())
    }
}
