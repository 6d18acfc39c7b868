use mindflow_types::{AgentMessage, ContentPart, MessageContent};

use crate::tool_result::sanitize_text;

/// Shown in history for messages that only rendered a component
pub const COMPONENT_PLACEHOLDER: &str = "[Showed interactive component]";

/// User-visible text of a message body
///
/// Text parts are sanitized one by one and joined without a separator;
/// every other part kind is dropped.
pub fn extract_text(content: Option<&MessageContent>) -> String {
    match content {
        Some(MessageContent::Text(text)) => sanitize_text(text),
        Some(MessageContent::Parts(parts)) => parts
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text { text } => Some(sanitize_text(text)),
                ContentPart::ToolCall { .. } | ContentPart::Component { .. } | ContentPart::Other => {
                    None
                }
            })
            .filter(|text| !text.is_empty())
            .collect(),
        Some(MessageContent::Unsupported(_)) | None => String::new(),
    }
}

/// Text to show (and persist) for a message, falling back to the
/// component placeholder when the agent rendered a component but said nothing
pub fn display_text(message: &AgentMessage) -> String {
    let text = extract_text(message.content.as_ref());
    if text.is_empty() && message.has_component() {
        return COMPONENT_PLACEHOLDER.to_string();
    }
    text
}
