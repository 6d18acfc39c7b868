use chrono::Utc;

/// `<prefix>_<unix millis>_<7 random chars>`, e.g. `mood_1767225600000_3f9a1c2`
pub(crate) fn prefixed_id(prefix: &str) -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), &random[..7])
}
