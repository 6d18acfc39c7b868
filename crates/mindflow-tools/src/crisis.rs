use serde::Serialize;

/// Phrases that signal a user may be in crisis, matched case-insensitively
pub const CRISIS_KEYWORDS: [&str; 12] = [
    "suicide",
    "kill myself",
    "end it all",
    "self-harm",
    "hurt myself",
    "don't want to live",
    "no reason to live",
    "better off without me",
    "want to die",
    "end my life",
    "not worth living",
    "take my own life",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrisisResource {
    pub name: &'static str,
    pub contact: &'static str,
    pub description: &'static str,
}

pub const CRISIS_RESOURCES: [CrisisResource; 3] = [
    CrisisResource {
        name: "National Suicide Prevention Lifeline",
        contact: "988 (call or text)",
        description: "Free, confidential 24/7 support for people in distress.",
    },
    CrisisResource {
        name: "Crisis Text Line",
        contact: "Text HOME to 741741",
        description: "Free 24/7 text-based crisis support.",
    },
    CrisisResource {
        name: "International Association for Suicide Prevention",
        contact: "https://www.iasp.info/resources/Crisis_Centres/",
        description: "Find crisis centers worldwide.",
    },
];

const CRISIS_MESSAGE: &str = "I hear you, and I want you to know that you matter. \
Please reach out to one of these resources. Trained professionals are available 24/7 to help.";

const NO_CRISIS_MESSAGE: &str =
    "No immediate crisis signals detected. Continue providing empathetic support.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisAssessment {
    pub success: bool,
    pub is_crisis: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<CrisisResource>>,
    pub message: String,
}

pub fn is_crisis(context: &str) -> bool {
    let lower = context.to_lowercase();
    CRISIS_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Scan a message for crisis language and attach hotlines when found
pub fn assess(context: &str) -> CrisisAssessment {
    if is_crisis(context) {
        tracing::warn!("Crisis signals detected, returning crisis resources");
        CrisisAssessment {
            success: true,
            is_crisis: true,
            resources: Some(CRISIS_RESOURCES.to_vec()),
            message: CRISIS_MESSAGE.to_string(),
        }
    } else {
        CrisisAssessment {
            success: true,
            is_crisis: false,
            resources: None,
            message: NO_CRISIS_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_match_case_insensitively() {
        assert!(is_crisis("Sometimes I WANT TO DIE"));
        assert!(is_crisis("I've been thinking about self-harm"));
        assert!(is_crisis("they'd be better off without me"));
    }

    #[test]
    fn test_ordinary_message_is_not_crisis() {
        let assessment = assess("Work was stressful but I went for a run");
        assert!(!assessment.is_crisis);
        assert!(assessment.resources.is_none());
    }

    #[test]
    fn test_crisis_returns_all_resources() {
        let assessment = assess("I don't want to live anymore");
        assert!(assessment.is_crisis);
        assert_eq!(assessment.resources.as_ref().map(Vec::len), Some(3));

        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["isCrisis"], true);
        assert_eq!(json["resources"][1]["contact"], "Text HOME to 741741");
    }

    #[test]
    fn test_no_crisis_omits_resources_field() {
        let json = serde_json::to_value(assess("hello")).unwrap();
        assert!(json.get("resources").is_none());
        assert_eq!(json["success"], true);
    }
}
