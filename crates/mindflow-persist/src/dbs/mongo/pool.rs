#[cfg(feature = "mongodb")]
use std::time::Duration;

#[cfg(feature = "mongodb")]
use mongodb::{options::ClientOptions, Client, Database};
#[cfg(feature = "mongodb")]
use tokio::sync::OnceCell;

#[cfg(feature = "mongodb")]
use crate::error::{PersistError, Result};

/// Process-wide MongoDB connection pool
///
/// Nothing connects until the first `acquire`; every later call gets the
/// same driver client (which pools connections internally). Create one per
/// process and hand it to whatever needs storage.
#[cfg(feature = "mongodb")]
pub struct MongoPool {
    uri: String,
    database: String,
    pool_size: u32,
    timeout: Duration,
    client: OnceCell<Client>,
}

#[cfg(feature = "mongodb")]
impl MongoPool {
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            pool_size: 10,
            timeout: Duration::from_secs(5),
            client: OnceCell::new(),
        }
    }

    pub fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn database_name(&self) -> &str {
        &self.database
    }

    /// Connect on first use, then return the shared client
    pub async fn acquire(&self) -> Result<&Client> {
        self.client
            .get_or_try_init(|| async {
                tracing::info!(database = %self.database, pool_size = self.pool_size, "Connecting to MongoDB");

                let mut options = ClientOptions::parse(&self.uri)
                    .await
                    .map_err(|e| PersistError::Connection(e.to_string()))?;
                options.app_name = Some("mindflow".to_string());
                options.max_pool_size = Some(self.pool_size);
                options.connect_timeout = Some(self.timeout);
                options.server_selection_timeout = Some(self.timeout);

                Client::with_options(options).map_err(|e| PersistError::Connection(e.to_string()))
            })
            .await
    }

    pub async fn database(&self) -> Result<Database> {
        Ok(self.acquire().await?.database(&self.database))
    }

    pub fn is_connected(&self) -> bool {
        self.client.initialized()
    }
}
