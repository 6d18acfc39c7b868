#[cfg(feature = "mongodb")]
use std::sync::Arc;
#[cfg(feature = "mongodb")]
use std::time::Duration;

#[cfg(feature = "mongodb")]
use crate::dbs::mongo::{MongoPersistenceClient, MongoPool};
#[cfg(feature = "mongodb")]
use crate::error::{PersistError, Result};

#[cfg(feature = "mongodb")]
pub struct PersistClientBuilder {
    mongodb_uri: Option<String>,
    database: Option<String>,
    pool_size: u32,
    timeout: Duration,
    ensure_indexes: bool,
}

#[cfg(feature = "mongodb")]
impl PersistClientBuilder {
    pub fn new() -> Self {
        Self {
            mongodb_uri: None,
            database: None,
            pool_size: 10,
            timeout: Duration::from_secs(5),
            ensure_indexes: true,
        }
    }

    pub fn mongodb_uri(mut self, uri: impl Into<String>) -> Self {
        self.mongodb_uri = Some(uri.into());
        self
    }

    pub fn database(mut self, db: impl Into<String>) -> Self {
        self.database = Some(db.into());
        self
    }

    pub fn pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn ensure_indexes(mut self, enabled: bool) -> Self {
        self.ensure_indexes = enabled;
        self
    }

    /// Build the pool without connecting
    pub fn build_pool(&self) -> Result<MongoPool> {
        let mongodb_uri = self
            .mongodb_uri
            .clone()
            .ok_or_else(|| PersistError::Internal("mongodb_uri is required".to_string()))?;
        let database = self
            .database
            .clone()
            .ok_or_else(|| PersistError::Internal("database is required".to_string()))?;

        Ok(MongoPool::new(mongodb_uri, database)
            .with_pool_size(self.pool_size)
            .with_timeout(self.timeout))
    }

    pub async fn build(self) -> Result<MongoPersistenceClient> {
        let pool = Arc::new(self.build_pool()?);
        let client = MongoPersistenceClient::connect(pool).await?;

        if self.ensure_indexes {
            client.ensure_indexes().await?;
        }

        Ok(client)
    }
}

#[cfg(feature = "mongodb")]
impl Default for PersistClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
