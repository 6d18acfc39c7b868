use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};

pub const BRAVE_SEARCH_URL: &str = "https://api.search.brave.com";
const BRAVE_SEARCH_PATH: &str = "/res/v1/web/search";
const BRAVE_RESULT_COUNT: &str = "5";

/// Results returned when the query matches no curated resource
const FALLBACK_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellnessResource {
    pub title: String,
    pub url: String,
    pub description: String,
}

/// (title, url, description)
const CURATED_RESOURCES: [(&str, &str, &str); 8] = [
    (
        "Managing Anxiety - Mental Health Foundation",
        "https://www.mentalhealth.org.uk/explore-mental-health/a-z-topics/anxiety",
        "Comprehensive guide on understanding and managing anxiety, including symptoms, causes, and coping strategies.",
    ),
    (
        "Mindfulness Exercises - Mayo Clinic",
        "https://www.mayoclinic.org/healthy-lifestyle/consumer-health/in-depth/mindfulness-exercises/art-20046356",
        "Simple mindfulness exercises you can practice anywhere to reduce stress and improve well-being.",
    ),
    (
        "Coping with Stress - CDC",
        "https://www.cdc.gov/mental-health/living-well/cope-with-stress/index.html",
        "Evidence-based strategies for coping with stress, including healthy habits and when to seek help.",
    ),
    (
        "Sleep and Mental Health - Harvard Health",
        "https://www.health.harvard.edu/newsletter_article/sleep-and-mental-health",
        "How sleep affects mental health and practical tips for improving sleep quality.",
    ),
    (
        "Self-Care Tips - NIMH",
        "https://www.nimh.nih.gov/health/topics/caring-for-your-mental-health",
        "National Institute of Mental Health guide to taking care of your mental health with actionable steps.",
    ),
    (
        "Breathing Exercises for Stress - Healthline",
        "https://www.healthline.com/health/breathing-exercises-for-anxiety",
        "10 breathing techniques that can help reduce anxiety and promote relaxation.",
    ),
    (
        "Gratitude and Well-Being - Psychology Today",
        "https://www.psychologytoday.com/us/basics/gratitude",
        "The science behind gratitude and how practicing it can improve mental health.",
    ),
    (
        "Depression Overview - WHO",
        "https://www.who.int/news-room/fact-sheets/detail/depression",
        "World Health Organization fact sheet on depression, including global statistics and treatment options.",
    ),
];

pub fn curated_resources() -> Vec<WellnessResource> {
    CURATED_RESOURCES
        .iter()
        .map(|(title, url, description)| WellnessResource {
            title: title.to_string(),
            url: url.to_string(),
            description: description.to_string(),
        })
        .collect()
}

/// Keyword match over the curated list
///
/// A resource matches when any whitespace-separated keyword of the query
/// occurs in its title or description. An empty query matches everything;
/// a query that matches nothing falls back to the first five resources.
pub fn curated_search(query: &str) -> Vec<WellnessResource> {
    let all = curated_resources();
    let query = query.to_lowercase();
    let keywords: Vec<&str> = query.split_whitespace().collect();
    if keywords.is_empty() {
        return all;
    }

    let matched: Vec<WellnessResource> = all
        .iter()
        .filter(|resource| {
            let text = format!("{} {}", resource.title, resource.description).to_lowercase();
            keywords.iter().any(|kw| text.contains(kw))
        })
        .cloned()
        .collect();

    if matched.is_empty() {
        all.into_iter().take(FALLBACK_COUNT).collect()
    } else {
        matched
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceSource {
    BraveSearch,
    Curated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub source: ResourceSource,
    pub results: Vec<WellnessResource>,
}

#[derive(Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: Option<BraveWeb>,
}

#[derive(Deserialize)]
struct BraveWeb {
    #[serde(default)]
    results: Vec<BraveResult>,
}

#[derive(Deserialize)]
struct BraveResult {
    title: String,
    url: String,
    #[serde(default)]
    description: String,
}

/// Brave web search client
#[derive(Clone)]
pub struct BraveSearch {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl BraveSearch {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, BRAVE_SEARCH_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Search the web for `"<query> mental health wellness"`
    pub async fn search(&self, query: &str) -> Result<Vec<WellnessResource>> {
        let search_query = format!("{} mental health wellness", query);
        let response = self
            .client
            .get(format!("{}{}", self.base_url, BRAVE_SEARCH_PATH))
            .header("Accept", "application/json")
            .header("X-Subscription-Token", &self.api_key)
            .query(&[("q", search_query.as_str()), ("count", BRAVE_RESULT_COUNT)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::SearchStatus(status.as_u16()));
        }

        let body: BraveResponse = response.json().await?;
        Ok(body
            .web
            .map(|web| web.results)
            .unwrap_or_default()
            .into_iter()
            .map(|r| WellnessResource {
                title: r.title,
                url: r.url,
                description: r.description,
            })
            .collect())
    }
}

/// Wellness resource search, live when a Brave key is configured
#[derive(Clone, Default)]
pub struct ResourceSearch {
    brave: Option<BraveSearch>,
}

impl ResourceSearch {
    pub fn curated_only() -> Self {
        Self { brave: None }
    }

    pub fn with_brave(brave: BraveSearch) -> Self {
        Self { brave: Some(brave) }
    }

    /// Build from an optional API key; a blank key means curated only
    pub fn from_api_key(api_key: Option<String>) -> Self {
        match api_key.filter(|key| !key.trim().is_empty()) {
            Some(key) => Self::with_brave(BraveSearch::new(key)),
            None => Self::curated_only(),
        }
    }

    pub fn is_live(&self) -> bool {
        self.brave.is_some()
    }

    /// Live search first; any failure or empty result uses the curated list
    pub async fn search(&self, query: &str) -> SearchResponse {
        if let Some(brave) = &self.brave {
            match brave.search(query).await {
                Ok(results) if !results.is_empty() => {
                    return SearchResponse {
                        query: query.to_string(),
                        source: ResourceSource::BraveSearch,
                        results,
                    };
                }
                Ok(_) => tracing::debug!("Brave search returned no results for '{}'", query),
                Err(e) => tracing::warn!("Brave search failed, using curated resources: {}", e),
            }
        }

        SearchResponse {
            query: query.to_string(),
            source: ResourceSource::Curated,
            results: curated_search(query),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(results: &[WellnessResource]) -> Vec<&str> {
        results.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_keyword_matches_title_or_description() {
        let results = curated_search("Sleep");
        assert_eq!(titles(&results), vec!["Sleep and Mental Health - Harvard Health"]);
    }

    #[test]
    fn test_any_keyword_matches() {
        let results = curated_search("gratitude depression");
        assert_eq!(
            titles(&results),
            vec![
                "Gratitude and Well-Being - Psychology Today",
                "Depression Overview - WHO",
            ]
        );
    }

    #[test]
    fn test_no_match_falls_back_to_first_five() {
        let results = curated_search("xylophone");
        assert_eq!(results.len(), 5);
        assert_eq!(results[0].title, "Managing Anxiety - Mental Health Foundation");
        assert_eq!(results[4].title, "Self-Care Tips - NIMH");
    }

    #[test]
    fn test_empty_query_returns_everything() {
        assert_eq!(curated_search("").len(), 8);
        assert_eq!(curated_search("   ").len(), 8);
    }

    #[test]
    fn test_source_serialization() {
        let response = SearchResponse {
            query: "stress".into(),
            source: ResourceSource::BraveSearch,
            results: vec![],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["source"], "brave_search");
    }

    #[test]
    fn test_blank_api_key_is_curated_only() {
        assert!(!ResourceSearch::from_api_key(Some("  ".into())).is_live());
        assert!(!ResourceSearch::from_api_key(None).is_live());
        assert!(ResourceSearch::from_api_key(Some("key".into())).is_live());
    }
}
