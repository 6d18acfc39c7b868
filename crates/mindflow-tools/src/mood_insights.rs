//! Mood history views for the assistant: chart points, a plain-text
//! summary, averages and downloadable reports.
//!
//! Every function takes entries newest first, as the mood store returns them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mindflow_types::{Mood, MoodEntry};

use crate::error::{Result, ToolError};

pub const NO_ENTRIES_SUMMARY: &str = "No mood entries found for this period.";

/// Days covered when the caller does not say
pub const DEFAULT_DAYS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    /// e.g. "Jan 5"
    pub date: String,
    pub mood: u8,
    pub label: Mood,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodHistory {
    pub success: bool,
    pub count: usize,
    pub summary: String,
    pub chart_data: Vec<ChartPoint>,
}

impl MoodHistory {
    pub fn from_entries(entries: &[MoodEntry]) -> Self {
        Self {
            success: true,
            count: entries.len(),
            summary: history_summary(entries),
            chart_data: chart_data(entries),
        }
    }
}

/// Chart points, oldest first
pub fn chart_data(entries: &[MoodEntry]) -> Vec<ChartPoint> {
    entries
        .iter()
        .rev()
        .map(|entry| ChartPoint {
            date: entry.timestamp.format("%b %-d").to_string(),
            mood: entry.mood.value(),
            label: entry.mood,
        })
        .collect()
}

/// One line per entry: `<date>: <mood>` plus ` - "<note>"` when noted
pub fn history_summary(entries: &[MoodEntry]) -> String {
    if entries.is_empty() {
        return NO_ENTRIES_SUMMARY.to_string();
    }

    entries
        .iter()
        .map(|entry| {
            let date = entry.timestamp.format("%-m/%-d/%Y");
            match entry.note.as_deref().filter(|n| !n.is_empty()) {
                Some(note) => format!("{}: {} - \"{}\"", date, entry.mood, note),
                None => format!("{}: {}", date, entry.mood),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Mean mood value, `None` without entries
pub fn average_mood(entries: &[MoodEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let total: u32 = entries.iter().map(|e| u32::from(e.mood.value())).sum();
    Some(f64::from(total) / entries.len() as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodReport {
    pub filename: String,
    pub content: String,
    pub entries: usize,
}

impl MoodReport {
    pub fn message(&self) -> String {
        format!("Exported {} mood entries to {}", self.entries, self.filename)
    }
}

/// Render a report file for download. Empty data is an error.
pub fn export_report(
    entries: &[MoodEntry],
    format: ReportFormat,
    days: u32,
    generated_at: DateTime<Utc>,
) -> Result<MoodReport> {
    if entries.is_empty() {
        return Err(ToolError::NoMoodData);
    }

    let content = match format {
        ReportFormat::Json => serde_json::to_string_pretty(entries)?,
        ReportFormat::Text => text_report(entries, days, generated_at),
    };

    Ok(MoodReport {
        filename: format!(
            "mindflow-moods-{}.{}",
            generated_at.format("%Y-%m-%d"),
            format.extension()
        ),
        content,
        entries: entries.len(),
    })
}

fn text_report(entries: &[MoodEntry], days: u32, generated_at: DateTime<Utc>) -> String {
    let mut lines = vec![
        "MindFlow Mood Report".to_string(),
        format!("Generated: {}", local_datetime(generated_at)),
        format!("Period: Last {} days", days),
        format!("Total Entries: {}", entries.len()),
        String::new(),
        "---".to_string(),
        String::new(),
    ];

    for entry in entries {
        lines.push(format!("Date: {}", local_datetime(entry.timestamp)));
        lines.push(format!("Mood: {}", entry.mood));
        if !entry.emotions.is_empty() {
            lines.push(format!("Emotions: {}", entry.emotions.join(", ")));
        }
        if let Some(triggers) = entry.triggers.as_ref().filter(|t| !t.is_empty()) {
            lines.push(format!("Triggers: {}", triggers.join(", ")));
        }
        if let Some(note) = entry.note.as_deref().filter(|n| !n.is_empty()) {
            lines.push(format!("Note: {}", note));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn local_datetime(at: DateTime<Utc>) -> String {
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
