use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mindflow_persist::{PersistError, ThreadStore};
use mindflow_types::{AgentMessage, Message, ThreadUpdate};

use crate::merge::merge_history;
use crate::title::TitleState;

/// Result of one save attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing new to save, or the agent is still streaming
    Skipped,
    /// The merged history was written
    Saved { messages: usize },
    /// A newer save already reached the store
    Stale,
    /// The store call failed; the next observation retries everything
    Failed,
}

/// Keeps one open thread's persisted history in step with the live session
///
/// Persistence is best-effort: store failures are logged and never returned
/// from [`ThreadSync::observe`], so the chat stays usable without storage.
pub struct ThreadSync {
    store: Arc<dyn ThreadStore>,
    owner_id: String,
    thread_id: String,
    /// History as last loaded from the store
    persisted: Vec<Message>,
    /// Fresh message count covered by the last successful save
    saved_count: usize,
    version: u64,
    title: TitleState,
    auto_title: bool,
    title_dirty: bool,
    first_seen: HashMap<String, DateTime<Utc>>,
}

impl ThreadSync {
    /// Load a thread's history. A missing thread simply has none.
    pub async fn open(
        store: Arc<dyn ThreadStore>,
        owner_id: impl Into<String>,
        thread_id: impl Into<String>,
    ) -> Result<Self, PersistError> {
        let owner_id = owner_id.into();
        let thread_id = thread_id.into();

        let thread = match store.get_thread(&owner_id, &thread_id).await {
            Ok(thread) => thread,
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e),
        };

        let (persisted, version, title) = match thread {
            Some(thread) => {
                let title = TitleState::from_stored(&thread.title);
                (thread.messages, thread.save_version, title)
            }
            None => {
                tracing::debug!(thread_id = %thread_id, "Thread not found, starting with empty history");
                (Vec::new(), 0, TitleState::Unset)
            }
        };

        Ok(Self {
            auto_title: persisted.is_empty(),
            store,
            owner_id,
            thread_id,
            persisted,
            saved_count: 0,
            version,
            title,
            title_dirty: false,
            first_seen: HashMap::new(),
        })
    }

    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub fn persisted(&self) -> &[Message] {
        &self.persisted
    }

    pub fn saved_count(&self) -> usize {
        self.saved_count
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn title(&self) -> &TitleState {
        &self.title
    }

    /// React to a change in the live session's messages
    ///
    /// Saves once the session holds more messages than the last save covered
    /// and the agent has finished streaming.
    pub async fn observe(&mut self, fresh: &[AgentMessage], streaming: bool) -> SaveOutcome {
        if streaming || fresh.len() <= self.saved_count {
            return SaveOutcome::Skipped;
        }

        if self.auto_title {
            if let Some(title) = self.title.try_derive(fresh) {
                tracing::debug!(thread_id = %self.thread_id, title = %title, "Derived thread title");
                self.title_dirty = true;
            }
        }

        let merged = self.merge(fresh);
        let count = merged.len();
        let next_version = self.version + 1;

        let mut update = ThreadUpdate::messages(merged).with_version(next_version);
        if self.title_dirty {
            if let Some(title) = self.title.title() {
                update = update.with_title(title);
            }
        }

        match self
            .store
            .update_thread(&self.owner_id, &self.thread_id, update)
            .await
        {
            Ok(()) => {
                self.saved_count = fresh.len();
                self.version = next_version;
                self.title_dirty = false;
                tracing::debug!(
                    thread_id = %self.thread_id,
                    messages = count,
                    version = next_version,
                    "Saved thread history"
                );
                SaveOutcome::Saved { messages: count }
            }
            Err(PersistError::StaleWrite { version, .. }) => {
                tracing::warn!(
                    thread_id = %self.thread_id,
                    version,
                    "Thread save rejected as stale"
                );
                self.version = self.version.max(version);
                self.reload().await;
                SaveOutcome::Stale
            }
            Err(e) => {
                tracing::error!(thread_id = %self.thread_id, "Failed to save thread history: {}", e);
                SaveOutcome::Failed
            }
        }
    }

    /// Set a user-chosen title and write it straight away
    ///
    /// Returns whether the store accepted it. On failure the title goes out
    /// with the next history save.
    pub async fn rename(&mut self, title: impl Into<String>) -> bool {
        self.title.set_explicit(title);
        self.title_dirty = true;

        let Some(title) = self.title.title() else {
            return false;
        };
        let update = ThreadUpdate::title(title);

        match self
            .store
            .update_thread(&self.owner_id, &self.thread_id, update)
            .await
        {
            Ok(()) => {
                self.title_dirty = false;
                true
            }
            Err(e) => {
                tracing::error!(thread_id = %self.thread_id, "Failed to rename thread: {}", e);
                false
            }
        }
    }

    /// Rebase on whatever the newer save left in the store
    ///
    /// The next observation merges the whole session on top of the stored
    /// history, so messages written by the other session are kept.
    async fn reload(&mut self) {
        match self.store.get_thread(&self.owner_id, &self.thread_id).await {
            Ok(Some(thread)) => {
                tracing::debug!(
                    thread_id = %self.thread_id,
                    messages = thread.messages.len(),
                    version = thread.save_version,
                    "Reloaded thread after stale save"
                );
                // A title the other session stored wins over our derived one
                let stored = TitleState::from_stored(&thread.title);
                if !stored.is_unset() && !matches!(self.title, TitleState::Explicit(_)) {
                    self.title = stored;
                    self.title_dirty = false;
                }
                self.persisted = thread.messages;
                self.version = self.version.max(thread.save_version);
                self.saved_count = 0;
            }
            Ok(None) => {
                tracing::warn!(thread_id = %self.thread_id, "Thread vanished after stale save");
            }
            Err(e) => {
                tracing::error!(thread_id = %self.thread_id, "Failed to reload thread: {}", e);
            }
        }
    }

    /// Merge against the last loaded history, stamping undated messages
    /// with the time they were first seen so repeated saves agree.
    fn merge(&mut self, fresh: &[AgentMessage]) -> Vec<Message> {
        let now = Utc::now();
        let stamped: Vec<AgentMessage> = fresh
            .iter()
            .map(|message| {
                let mut message = message.clone();
                if message.created_at.is_none() {
                    let seen = self.first_seen.entry(message.id.clone()).or_insert(now);
                    message.created_at = Some(*seen);
                }
                message
            })
            .collect();

        merge_history(&self.persisted, &stamped, now)
    }
}
