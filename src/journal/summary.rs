//! Derived journal statistics
//!
//! The summary is recomputed from whatever entries are currently loaded and
//! is never persisted.

use chrono::Local;
use serde::Serialize;

use super::types::MoodEntry;

/// Aggregate view over the loaded entries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of loaded entries
    pub count: usize,
    /// Mean mood rounded to one decimal place; `None` when there are no entries
    pub average_mood: Option<f64>,
    /// Last entry in server order; `None` when there are no entries
    pub latest_entry: Option<MoodEntry>,
}

impl Summary {
    /// Compute the summary for an entries sequence
    ///
    /// "Latest" is the last element as returned by the server. The sequence
    /// is not re-sorted.
    pub fn from_entries(entries: &[MoodEntry]) -> Self {
        Self {
            count: entries.len(),
            average_mood: average_mood(entries),
            latest_entry: entries.last().cloned(),
        }
    }

    /// Average formatted with exactly one decimal place, e.g. "8.0"
    pub fn average_display(&self) -> Option<String> {
        self.average_mood.map(|avg| format!("{:.1}", avg))
    }
}

/// Mean mood rounded to one decimal place
pub fn average_mood(entries: &[MoodEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }

    let sum: f64 = entries.iter().map(|e| e.mood).sum();
    Some(round_one_decimal(sum / entries.len() as f64))
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// The co-worker insight sentence shown above the chart
///
/// Returns `None` for an empty summary, where the insight panel is not shown.
pub fn insight_text(summary: &Summary) -> Option<String> {
    let average = summary.average_display()?;

    let mut text = format!(
        "You've logged {} mood entries so far. Your average mood is {}/10",
        summary.count, average
    );

    match &summary.latest_entry {
        Some(latest) => {
            let day = latest.date.with_timezone(&Local).format("%Y-%m-%d");
            text.push_str(&format!(
                ", and your latest entry on {} was {}/10.",
                day, latest.mood
            ));
        }
        None => text.push('.'),
    }

    Some(text)
}
