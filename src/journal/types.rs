//! Core data types for mood journal entries
//!
//! - `MoodEntry`: an entry as stored and returned by the server
//! - `NewEntry`: an entry as submitted by the client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest mood on the rating scale
pub const MOOD_MIN: f64 = 1.0;

/// Highest mood on the rating scale
pub const MOOD_MAX: f64 = 10.0;

/// A single mood-journal record
///
/// Created server-side; the client only holds a read-only copy. Extra
/// fields the server adds (ids, owner, timestamps) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodEntry {
    /// When the entry was recorded
    pub date: DateTime<Utc>,
    /// Mood rating, expected on the 1-10 scale
    pub mood: f64,
    /// Optional free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MoodEntry {
    /// Create an entry recorded at the given time
    pub fn new(date: DateTime<Utc>, mood: f64) -> Self {
        Self {
            date,
            mood,
            note: None,
        }
    }

    /// Builder method: attach a note
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Whether the mood lies on the 1-10 scale
    pub fn in_range(&self) -> bool {
        (MOOD_MIN..=MOOD_MAX).contains(&self.mood)
    }
}

/// Entry fields posted to the server when adding an entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewEntry {
    pub mood: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl NewEntry {
    pub fn new(mood: f64) -> Self {
        Self { mood, note: None }
    }

    /// Builder method: attach a note
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
