pub mod client;
pub mod models;
pub mod pool;
pub mod repositories;

#[cfg(feature = "mongodb")]
pub use client::MongoPersistenceClient;
#[cfg(feature = "mongodb")]
pub use pool::MongoPool;
