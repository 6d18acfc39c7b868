use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search API returned {0}")]
    SearchStatus(u16),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No mood data to export")]
    NoMoodData,
}

pub type Result<T> = std::result::Result<T, ToolError>;
