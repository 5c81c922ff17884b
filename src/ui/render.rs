//! Terminal rendering of shell views

use chrono::Local;

use crate::app::View;
use crate::journal::{insight_text, MoodEntry, Summary};

use super::auth_panel::{AuthMode, AuthPanel};
use super::chart::render_chart;

pub const TITLE: &str = "Digital Mood Co-Worker";

pub const TAGLINE: &str =
    "Your AI-powered mood partner that helps you track emotional trends and reflect on your day.";

/// Default number of entries shown in the chart
pub const DEFAULT_CHART_WIDTH: usize = 30;

/// Render a full screen for the given view
pub fn render_view(view: &View<'_>) -> String {
    let body = match view {
        View::Auth(panel) => render_auth_panel(panel),
        View::Journal { summary, entries } => render_journal(summary.as_ref(), entries),
    };

    format!("{}\n{}\n\n{}", TITLE, TAGLINE, body)
}

pub fn render_auth_panel(panel: &AuthPanel) -> String {
    let tabs = [AuthMode::Login, AuthMode::Signup]
        .iter()
        .map(|mode| {
            if *mode == panel.mode() {
                format!("[{}]", mode.label())
            } else {
                format!(" {} ", mode.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut lines = vec!["Login".to_string(), tabs];
    for field in panel.visible_fields() {
        let value = match panel.field(*field) {
            Some(v) if field.is_secret() => "*".repeat(v.chars().count()),
            Some(v) => v.to_string(),
            None => String::new(),
        };
        lines.push(format!("{}: {}", field.placeholder(), value));
    }

    lines.join("\n")
}

/// The insight panel, shown only when there is at least one entry
pub fn render_insight(summary: &Summary) -> Option<String> {
    insight_text(summary).map(|text| format!("Co-worker insight\n{}", text))
}

/// Entries as a Date/Mood/Note table
///
/// Moods off the 1-10 scale are still listed but marked.
pub fn render_entries_table(entries: &[MoodEntry]) -> String {
    if entries.is_empty() {
        return [
            "No mood entries yet.",
            "",
            "Add your first entry with:",
            "  mood-journal add 7 --note \"Good day\"",
        ]
        .join("\n");
    }

    let mut lines = vec![
        format!("{:<12} {:<6} {}", "Date", "Mood", "Note"),
        "-".repeat(50),
    ];

    for entry in entries {
        let mood = if entry.in_range() {
            entry.mood.to_string()
        } else {
            format!("{}!", entry.mood)
        };
        lines.push(format!(
            "{:<12} {:<6} {}",
            entry.date.with_timezone(&Local).format("%Y-%m-%d"),
            mood,
            entry.note.as_deref().unwrap_or("-")
        ));
    }

    if entries.iter().any(|e| !e.in_range()) {
        lines.push(String::new());
        lines.push("! mood outside the 1-10 scale".to_string());
    }

    lines.join("\n")
}

fn render_journal(summary: Option<&Summary>, entries: &[MoodEntry]) -> String {
    let mut sections = Vec::new();

    if let Some(panel) = summary.and_then(render_insight) {
        sections.push(panel);
    }
    sections.push(render_chart(entries, DEFAULT_CHART_WIDTH));

    sections.join("\n\n")
}
