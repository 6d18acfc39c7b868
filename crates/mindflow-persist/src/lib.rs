pub mod builder;
pub mod dbs;
pub mod error;
pub mod memory;
pub mod trait_client;

pub use error::{PersistError, Result};
pub use memory::InMemoryStore;
pub use trait_client::{JournalStore, MoodStore, ThreadStore, MAX_LIST_LIMIT};

pub use dbs::http::OWNER_HEADER;

#[cfg(feature = "http")]
pub use dbs::http::HttpThreadStore;

#[cfg(feature = "mongodb")]
pub use builder::PersistClientBuilder;
#[cfg(feature = "mongodb")]
pub use dbs::mongo::{MongoPersistenceClient, MongoPool};
