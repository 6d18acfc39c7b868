use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::MessageContent;

/// Role of a message as reported by the conversation agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    User,
    Assistant,
    System,
    Tool,
}

impl AgentRole {
    /// Role this message keeps once persisted, if it is persisted at all
    pub fn persisted(self) -> Option<MessageRole> {
        match self {
            Self::User => Some(MessageRole::User),
            Self::Assistant => Some(MessageRole::Assistant),
            Self::System | Self::Tool => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
            Self::Tool => "tool",
        }
    }
}

/// A message from the live conversation, exactly as the agent SDK hands it over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentMessage {
    pub id: String,
    pub role: AgentRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
    /// UI element the agent chose to show for this message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendered_component: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl AgentMessage {
    pub fn new(id: impl Into<String>, role: AgentRole, content: impl Into<MessageContent>) -> Self {
        Self {
            id: id.into(),
            role,
            content: Some(content.into()),
            rendered_component: None,
            created_at: None,
        }
    }

    pub fn user(id: impl Into<String>, content: impl Into<MessageContent>) -> Self {
        Self::new(id, AgentRole::User, content)
    }

    pub fn assistant(id: impl Into<String>, content: impl Into<MessageContent>) -> Self {
        Self::new(id, AgentRole::Assistant, content)
    }

    pub fn tool(id: impl Into<String>, content: impl Into<MessageContent>) -> Self {
        Self::new(id, AgentRole::Tool, content)
    }

    pub fn with_component(mut self, component: Value) -> Self {
        self.rendered_component = Some(component);
        self
    }

    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    pub fn has_component(&self) -> bool {
        matches!(self.rendered_component, Some(ref c) if !c.is_null())
    }
}

/// Role of a persisted message. Tool and system output is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A message as stored in a thread's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(id: impl Into<String>, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, MessageRole::User, content)
    }

    pub fn assistant(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, MessageRole::Assistant, content)
    }
}
