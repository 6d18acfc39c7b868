use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of a message produced by the conversation agent
///
/// Agents send either a plain string or a list of typed parts. Anything else
/// the agent may put in the `content` slot lands in `Unsupported`. A part
/// that doesn't decode becomes [`ContentPart::Other`] without affecting the
/// rest of the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Simple text content
    Text(String),

    /// Multipart content (text interleaved with tool calls, components, ...)
    Parts(Vec<ContentPart>),

    /// Neither a string nor a part list
    Unsupported(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text {
        text: String,
    },

    ToolCall {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(default)]
        name: String,
        #[serde(default)]
        arguments: Value,
    },

    Component {
        #[serde(default)]
        name: String,
        #[serde(default)]
        props: Value,
    },

    /// Any part type we don't model (images, resources, ...)
    #[serde(other)]
    Other,
}

impl<'de> Deserialize<'de> for MessageContent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => Self::Text(text),
            Value::Array(items) => Self::Parts(
                items
                    .into_iter()
                    .map(|item| ContentPart::deserialize(item).unwrap_or(ContentPart::Other))
                    .collect(),
            ),
            other => Self::Unsupported(other),
        })
    }
}

impl MessageContent {
    /// Create text content
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Create multipart content
    pub fn parts(parts: Vec<ContentPart>) -> Self {
        Self::Parts(parts)
    }
}

impl ContentPart {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text { text: s.into() }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }
}

impl From<String> for MessageContent {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for MessageContent {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}
