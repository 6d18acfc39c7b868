pub mod content;
pub mod error;
pub mod journal;
pub mod message;
pub mod mood;
pub mod thread;

mod ids;

pub use content::{ContentPart, MessageContent};
pub use error::ValidationError;
pub use journal::{JournalEntry, NewJournalEntry};
pub use message::{AgentMessage, AgentRole, Message, MessageRole};
pub use mood::{Mood, MoodEntry, NewMoodEntry};
pub use thread::{NewThread, Thread, ThreadSummary, ThreadUpdate, DEFAULT_THREAD_TITLE};
