//! Mood Chart
//!
//! Text rendering of the entries sequence, most recent entries on the right.

use crate::journal::{MoodEntry, MOOD_MAX, MOOD_MIN};

/// Block glyphs from lowest to highest
const SPARK_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

const BAR: char = '█';

const PLACEHOLDER: &str = "No mood entries yet";

/// Render the last `width` entries as a vertical bar chart
///
/// One column per entry, rows from 10 down to 1. Moods are rounded to the
/// nearest whole rating and clamped to the scale.
pub fn render_chart(entries: &[MoodEntry], width: usize) -> String {
    let visible = last_n(entries, width);
    if visible.is_empty() {
        return PLACEHOLDER.to_string();
    }

    let heights: Vec<u32> = visible.iter().map(|e| bar_height(e.mood)).collect();
    let mut lines = Vec::with_capacity(MOOD_MAX as usize + 2);

    for row in (MOOD_MIN as u32..=MOOD_MAX as u32).rev() {
        let cells: String = heights
            .iter()
            .map(|&h| if h >= row { BAR } else { ' ' })
            .collect();
        lines.push(format!("{:>2} │{}", row, cells.trim_end()));
    }

    lines.push(format!("   └{}", "─".repeat(heights.len())));

    if let (Some(first), Some(last)) = (visible.first(), visible.last()) {
        lines.push(format!(
            "    {} → {}",
            first.date.format("%Y-%m-%d"),
            last.date.format("%Y-%m-%d")
        ));
    }

    lines.join("\n")
}

/// One-line trend of all entries using block glyphs
pub fn sparkline(entries: &[MoodEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            let scaled = (clamp_mood(e.mood) - MOOD_MIN) / (MOOD_MAX - MOOD_MIN);
            let idx = (scaled * (SPARK_GLYPHS.len() - 1) as f64).round() as usize;
            SPARK_GLYPHS[idx.min(SPARK_GLYPHS.len() - 1)]
        })
        .collect()
}

fn last_n(entries: &[MoodEntry], n: usize) -> &[MoodEntry] {
    &entries[entries.len().saturating_sub(n)..]
}

fn clamp_mood(mood: f64) -> f64 {
    if mood.is_nan() {
        MOOD_MIN
    } else {
        mood.clamp(MOOD_MIN, MOOD_MAX)
    }
}

fn bar_height(mood: f64) -> u32 {
    clamp_mood(mood).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn entries(moods: &[f64]) -> Vec<MoodEntry> {
        let start = Utc.with_ymd_and_hms(2024, 1, 10, 20, 0, 0).unwrap();
        moods
            .iter()
            .enumerate()
            .map(|(i, &m)| MoodEntry::new(start + Duration::days(i as i64), m))
            .collect()
    }

    #[test]
    fn test_empty_chart() {
        assert_eq!(render_chart(&[], 30), PLACEHOLDER);
        assert_eq!(sparkline(&[]), "");
    }

    #[test]
    fn test_bar_chart_layout() {
        let chart = render_chart(&entries(&[8.0, 6.0, 10.0]), 30);
        let lines: Vec<&str> = chart.lines().collect();

        // 10 rating rows, axis, date range
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "10 │  █");
        assert_eq!(lines[2], " 8 │█ █");
        assert_eq!(lines[4], " 6 │███");
        assert_eq!(lines[9], " 1 │███");
        assert_eq!(lines[10], "   └───");
        assert_eq!(lines[11], "    2024-01-10 → 2024-01-12");
    }

    #[test]
    fn test_chart_keeps_most_recent_entries() {
        let chart = render_chart(&entries(&[1.0, 2.0, 3.0, 10.0]), 2);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], "10 │ █");
        assert_eq!(lines[10], "   └──");
        assert!(lines[11].starts_with("    2024-01-12"));
    }

    #[test]
    fn test_out_of_range_moods_are_clamped() {
        let chart = render_chart(&entries(&[42.0, -3.0]), 10);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], "10 │█");
        assert_eq!(lines[9], " 1 │██");
    }

    #[test]
    fn test_sparkline() {
        assert_eq!(sparkline(&entries(&[1.0, 10.0, 5.5])), "▁█▅");
    }
}
