use std::collections::HashSet;

use chrono::{DateTime, Utc};
use mindflow_types::{AgentMessage, Message};

use crate::extract::display_text;

/// Convert a live message into its persisted form
///
/// Returns `None` for messages that are never stored: tool and system
/// output, and anything with no user-visible text left after sanitizing.
/// `fallback` stamps messages the agent sent without a creation time.
pub fn sanitize_message(message: &AgentMessage, fallback: DateTime<Utc>) -> Option<Message> {
    let role = message.role.persisted()?;
    let content = display_text(message);
    if content.is_empty() {
        return None;
    }

    Some(Message {
        id: message.id.clone(),
        role,
        content,
        timestamp: message.created_at.unwrap_or(fallback),
    })
}

/// `persisted ++ sanitize(fresh)`, the list written back to storage
///
/// The persisted prefix is kept as is. Fresh messages whose id is already
/// present are skipped so ids stay unique within the thread.
pub fn merge_history(
    persisted: &[Message],
    fresh: &[AgentMessage],
    fallback: DateTime<Utc>,
) -> Vec<Message> {
    let mut seen: HashSet<&str> = persisted.iter().map(|m| m.id.as_str()).collect();
    let mut merged = persisted.to_vec();

    for message in fresh {
        if seen.contains(message.id.as_str()) {
            continue;
        }
        if let Some(sanitized) = sanitize_message(message, fallback) {
            seen.insert(message.id.as_str());
            merged.push(sanitized);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindflow_types::{AgentRole, MessageRole};
    use serde_json::json;

    fn at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-05T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn pairs(messages: &[Message]) -> Vec<(MessageRole, &str)> {
        messages.iter().map(|m| (m.role, m.content.as_str())).collect()
    }

    #[test]
    fn test_tool_results_dropped_from_fresh_thread() {
        let fresh = vec![
            AgentMessage::user("m1", "Hi"),
            AgentMessage::assistant("m2", r#"{"success":true}"#),
            AgentMessage::assistant("m3", "Hello there"),
        ];

        let merged = merge_history(&[], &fresh, at());
        assert_eq!(
            pairs(&merged),
            vec![(MessageRole::User, "Hi"), (MessageRole::Assistant, "Hello there")]
        );
    }

    #[test]
    fn test_persisted_prefix_kept_in_order() {
        let persisted = vec![Message::user("p1", "Earlier"), Message::assistant("p2", "Reply")];
        let fresh = vec![AgentMessage::user("m1", "Again")];

        let merged = merge_history(&persisted, &fresh, at());
        assert_eq!(merged.len(), 3);
        assert_eq!(&merged[..2], &persisted[..]);
        assert_eq!(merged[2].content, "Again");
    }

    #[test]
    fn test_tool_and_system_roles_never_persisted() {
        let fresh = vec![
            AgentMessage::new("s1", AgentRole::System, "You are kind"),
            AgentMessage::tool("t1", "plain text from a tool"),
            AgentMessage::tool("t2", "x").with_component(json!({"name": "MoodChart"})),
            AgentMessage::assistant("a1", "ok"),
        ];

        let merged = merge_history(&[], &fresh, at());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "a1");
    }

    #[test]
    fn test_merge_is_deterministic() {
        let persisted = vec![Message::user("p1", "Hi")];
        let fresh = vec![AgentMessage::assistant("m1", "Hello")];

        let first = merge_history(&persisted, &fresh, at());
        let second = merge_history(&persisted, &fresh, at());
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_ids_skipped() {
        let persisted = vec![Message::user("m1", "Hi")];
        let fresh = vec![
            AgentMessage::user("m1", "Hi"),
            AgentMessage::assistant("m2", "Hello"),
            AgentMessage::assistant("m2", "Hello again"),
        ];

        let merged = merge_history(&persisted, &fresh, at());
        let ids: Vec<&str> = merged.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
        assert_eq!(merged[1].content, "Hello");
    }

    #[test]
    fn test_dropped_message_does_not_claim_its_id() {
        let fresh = vec![
            AgentMessage::assistant("m1", r#"{"success":true}"#),
            AgentMessage::assistant("m1", "Here is what I found"),
        ];

        let merged = merge_history(&[], &fresh, at());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].content, "Here is what I found");
    }

    #[test]
    fn test_created_at_preferred_over_fallback() {
        let created = at() - chrono::Duration::minutes(5);
        let fresh = vec![AgentMessage::user("m1", "Hi").with_created_at(created)];
        let merged = merge_history(&[], &fresh, at());
        assert_eq!(merged[0].timestamp, created);
    }
}
