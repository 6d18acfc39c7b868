#[cfg(feature = "mongodb")]
use chrono::{DateTime, Utc};
#[cfg(feature = "mongodb")]
use futures::TryStreamExt;
#[cfg(feature = "mongodb")]
use mongodb::{bson, bson::doc, Collection, Database, IndexModel};

#[cfg(feature = "mongodb")]
use crate::dbs::mongo::models::MongoMood;
#[cfg(feature = "mongodb")]
use crate::error::Result;

#[cfg(feature = "mongodb")]
#[derive(Clone)]
pub struct MongoMoodRepository {
    collection: Collection<MongoMood>,
}

#[cfg(feature = "mongodb")]
impl MongoMoodRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection("moods");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "timestamp": -1 })
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }

    pub async fn save_mood(&self, mood: MongoMood) -> Result<()> {
        self.collection.insert_one(&mood).await?;
        Ok(())
    }

    /// Newest first
    pub async fn list_moods(
        &self,
        user_id: &str,
        since: Option<DateTime<Utc>>,
        limit: i64,
    ) -> Result<Vec<MongoMood>> {
        let mut filter = doc! { "user_id": user_id };
        if let Some(since) = since {
            filter.insert(
                "timestamp",
                doc! { "$gte": bson::DateTime::from_millis(since.timestamp_millis()) },
            );
        }

        let moods = self
            .collection
            .find(filter)
            .sort(doc! { "timestamp": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(moods)
    }
}
