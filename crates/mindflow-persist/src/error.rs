use thiserror::Error;

use mindflow_types::ValidationError;

#[derive(Error, Debug)]
pub enum PersistError {
    #[cfg(feature = "mongodb")]
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[cfg(feature = "mongodb")]
    #[error("BSON serialization error: {0}")]
    BsonSerialization(#[from] bson::ser::Error),

    #[cfg(feature = "mongodb")]
    #[error("BSON deserialization error: {0}")]
    BsonDeserialization(#[from] bson::de::Error),

    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote store returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    #[error("Thread already exists: {0}")]
    ThreadExists(String),

    #[error("Stale write to thread {thread_id} (version {version})")]
    StaleWrite { thread_id: String, version: u64 },

    #[error("Journal entry not found: {0}")]
    JournalNotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PersistError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ThreadNotFound(_) | Self::JournalNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, PersistError>;
