use mindflow_types::{AgentMessage, AgentRole, DEFAULT_THREAD_TITLE};

use crate::extract::extract_text;

/// Longest auto-derived title, in characters, before the ellipsis
pub const TITLE_MAX_CHARS: usize = 50;

const ELLIPSIS: &str = "...";

/// Title for a fresh thread, from its first user message
///
/// Only the first user message is considered. Returns `None` when its
/// text is empty.
pub fn derive_title(fresh: &[AgentMessage]) -> Option<String> {
    let first = fresh.iter().find(|m| m.role == AgentRole::User)?;
    let text = extract_text(first.content.as_ref());
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if text.chars().count() > TITLE_MAX_CHARS {
        let mut title: String = text.chars().take(TITLE_MAX_CHARS).collect();
        title.push_str(ELLIPSIS);
        Some(title)
    } else {
        Some(text.to_string())
    }
}

/// How a thread got its title
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TitleState {
    #[default]
    Unset,
    /// Taken from the first user message
    Derived(String),
    /// Chosen by the user
    Explicit(String),
}

impl TitleState {
    /// State for a thread loaded from storage
    pub fn from_stored(title: &str) -> Self {
        if title.is_empty() || title == DEFAULT_THREAD_TITLE {
            Self::Unset
        } else {
            Self::Explicit(title.to_string())
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Unset => None,
            Self::Derived(title) | Self::Explicit(title) => Some(title),
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// `Unset -> Derived` when the first user message has text.
    /// Returns the new title on that transition only.
    pub fn try_derive(&mut self, fresh: &[AgentMessage]) -> Option<&str> {
        if !self.is_unset() {
            return None;
        }
        *self = Self::Derived(derive_title(fresh)?);
        self.title()
    }

    /// Any state moves to `Explicit`
    pub fn set_explicit(&mut self, title: impl Into<String>) {
        *self = Self::Explicit(title.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindflow_types::{ContentPart, MessageContent};

    #[test]
    fn test_first_user_message_wins() {
        let fresh = vec![
            AgentMessage::assistant("a0", "Welcome back"),
            AgentMessage::user("u1", "  I feel anxious today  "),
            AgentMessage::user("u2", "Also tired"),
        ];
        assert_eq!(derive_title(&fresh).as_deref(), Some("I feel anxious today"));
    }

    #[test]
    fn test_fifty_chars_kept_as_is() {
        let text = "a".repeat(50);
        let title = derive_title(&[AgentMessage::user("u1", text.as_str())]).unwrap();
        assert_eq!(title, text);
    }

    #[test]
    fn test_fifty_one_chars_truncated() {
        let text = "b".repeat(51);
        let title = derive_title(&[AgentMessage::user("u1", text.as_str())]).unwrap();
        assert_eq!(title, format!("{}...", "b".repeat(50)));
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let text = "é".repeat(60);
        let title = derive_title(&[AgentMessage::user("u1", text.as_str())]).unwrap();
        assert_eq!(title.chars().count(), 53);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn test_no_title_without_user_text() {
        assert_eq!(derive_title(&[]), None);
        assert_eq!(derive_title(&[AgentMessage::assistant("a1", "Hello")]), None);

        let tool_call_only = AgentMessage::user(
            "u1",
            MessageContent::parts(vec![ContentPart::ToolCall {
                id: None,
                name: "logMood".into(),
                arguments: serde_json::Value::Null,
            }]),
        );
        assert_eq!(derive_title(&[tool_call_only]), None);
    }

    #[test]
    fn test_state_derives_once() {
        let mut state = TitleState::default();
        assert_eq!(state.try_derive(&[AgentMessage::user("u1", "First")]), Some("First"));
        assert_eq!(state.try_derive(&[AgentMessage::user("u2", "Second")]), None);
        assert_eq!(state, TitleState::Derived("First".into()));
    }

    #[test]
    fn test_explicit_blocks_derivation() {
        let mut state = TitleState::default();
        state.set_explicit("Sleep notes");
        assert_eq!(state.try_derive(&[AgentMessage::user("u1", "Hi")]), None);
        assert_eq!(state.title(), Some("Sleep notes"));

        let mut derived = TitleState::Derived("Hi".into());
        derived.set_explicit("Renamed");
        assert_eq!(derived, TitleState::Explicit("Renamed".into()));
    }

    #[test]
    fn test_from_stored() {
        assert_eq!(TitleState::from_stored(DEFAULT_THREAD_TITLE), TitleState::Unset);
        assert_eq!(
            TitleState::from_stored("Work stress"),
            TitleState::Explicit("Work stress".into())
        );
    }
}
