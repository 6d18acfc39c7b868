use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Keys that mark a JSON object as backend tool output
pub const TOOL_RESULT_KEYS: [&str; 4] = ["success", "error", "count", "summary"];

static EMBEDDED_TOOL_RESULT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\{[^{}]*"success"\s*:\s*(true|false)[^{}]*\}"#)
        .expect("tool result pattern is valid")
});

/// Whether the whole text is a serialized tool result
///
/// Text that only looks like an object but fails to parse is plain text.
pub fn is_tool_result(text: &str) -> bool {
    let trimmed = text.trim();
    if !trimmed.starts_with('{') || !trimmed.ends_with('}') {
        return false;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => TOOL_RESULT_KEYS.iter().any(|key| map.contains_key(*key)),
        _ => false,
    }
}

/// Remove inline `{... "success": true|false ...}` fragments, then trim
pub fn strip_tool_result_fragments(text: &str) -> String {
    EMBEDDED_TOOL_RESULT.replace_all(text, "").trim().to_string()
}

/// Text left for the user once tool output is removed
pub fn sanitize_text(text: &str) -> String {
    if is_tool_result(text) {
        return String::new();
    }
    strip_tool_result_fragments(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_body_tool_results() {
        for body in [
            r#"{"success":true}"#,
            r#"  {"error":"Failed to fetch mood history"}  "#,
            r#"{"count":0,"chartData":[]}"#,
            r#"{"summary":"2 entries","extra":{"nested":true}}"#,
        ] {
            assert!(is_tool_result(body), "{body}");
            assert_eq!(sanitize_text(body), "");
        }
    }

    #[test]
    fn test_json_without_known_keys_is_text() {
        assert!(!is_tool_result(r#"{"affirmation":"You matter"}"#));
        assert!(!is_tool_result("[1, 2, 3]"));
    }

    #[test]
    fn test_malformed_json_does_not_panic() {
        let text = "{not really json}";
        assert!(!is_tool_result(text));
        assert_eq!(sanitize_text(text), text);
    }

    #[test]
    fn test_plain_text_unchanged() {
        let text = "Take a slow breath in, and out.";
        assert_eq!(sanitize_text(text), text);
    }

    #[test]
    fn test_embedded_fragment_stripped() {
        let text = r#"I've saved that for you. {"success": true, "message": "Saved"} Anything else?"#;
        assert_eq!(
            sanitize_text(text),
            "I've saved that for you.  Anything else?"
        );
    }

    #[test]
    fn test_fragment_with_false_and_trailing_fragment() {
        let text = r#"Sorry, that didn't work {"success":false,"error":"denied"}"#;
        assert_eq!(sanitize_text(text), "Sorry, that didn't work");
    }

    #[test]
    fn test_nested_fragment_not_matched() {
        // The pattern only matches flat objects
        let text = r#"Result: {"success": true, "data": {"a": 1}} done"#;
        assert_eq!(sanitize_text(text), text);
    }
}
