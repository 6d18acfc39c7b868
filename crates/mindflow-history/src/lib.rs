//! Conversation history reconciliation for MindFlow threads.
//!
//! The live agent session produces messages in a richer shape than the
//! persisted history keeps. This crate turns them into stored messages
//! (dropping tool output and keeping only user-visible text), merges them
//! onto the history loaded for the thread, and names fresh threads after
//! their first user message.

pub mod extract;
pub mod merge;
pub mod sync;
pub mod title;
pub mod tool_result;

pub use extract::{display_text, extract_text, COMPONENT_PLACEHOLDER};
pub use merge::{merge_history, sanitize_message};
pub use sync::{SaveOutcome, ThreadSync};
pub use title::{derive_title, TitleState, TITLE_MAX_CHARS};
pub use tool_result::{is_tool_result, sanitize_text, strip_tool_result_fragments, TOOL_RESULT_KEYS};
