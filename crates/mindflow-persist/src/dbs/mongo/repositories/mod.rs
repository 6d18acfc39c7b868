pub mod journal;
pub mod mood;
pub mod thread;

#[cfg(feature = "mongodb")]
pub use journal::MongoJournalRepository;
#[cfg(feature = "mongodb")]
pub use mood::MongoMoodRepository;
#[cfg(feature = "mongodb")]
pub use thread::MongoThreadRepository;
