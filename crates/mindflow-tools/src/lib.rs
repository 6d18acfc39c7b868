//! Wellness tools for the MindFlow assistant.
//!
//! Pure helpers (crisis screening, resource search, affirmations, mood
//! insights) plus [`WellnessServer`], which exposes the agent-facing ones
//! over the Model Context Protocol.

pub mod affirmation;
pub mod crisis;
pub mod error;
pub mod mood_insights;
pub mod resources;
pub mod service;

pub use affirmation::{affirmation_for, DailyAffirmation, AFFIRMATIONS};
pub use crisis::{assess, is_crisis, CrisisAssessment, CrisisResource, CRISIS_KEYWORDS};
pub use error::{Result, ToolError};
pub use mood_insights::{
    average_mood, chart_data, export_report, history_summary, ChartPoint, MoodHistory, MoodReport,
    ReportFormat,
};
pub use resources::{
    curated_search, BraveSearch, ResourceSearch, ResourceSource, SearchResponse, WellnessResource,
};
pub use service::{streamable_http_service, CrisisParams, SearchParams, WellnessServer};
