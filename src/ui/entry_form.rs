//! Entry Form
//!
//! Collects a mood rating and an optional note for a new journal entry.

use thiserror::Error;

use crate::journal::{NewEntry, MOOD_MAX, MOOD_MIN};

/// Reasons a draft cannot be submitted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntryFormError {
    #[error("Mood must be a number, got {0:?}")]
    InvalidMood(String),

    #[error("Mood must be between 1 and 10, got {0}")]
    MoodOutOfRange(f64),
}

/// Draft of a new entry
#[derive(Debug, Clone, Default)]
pub struct EntryForm {
    mood: String,
    note: String,
}

impl EntryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mood(&mut self, mood: impl Into<String>) {
        self.mood = mood.into();
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    pub fn mood(&self) -> &str {
        &self.mood
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    /// Turn the draft into an entry
    ///
    /// The draft is cleared only when it produced a valid entry, so a typo
    /// can be corrected in place.
    pub fn submit(&mut self) -> Result<NewEntry, EntryFormError> {
        let entry = self.parse()?;
        self.mood.clear();
        self.note.clear();
        Ok(entry)
    }

    fn parse(&self) -> Result<NewEntry, EntryFormError> {
        let raw = self.mood.trim();
        let mood: f64 = raw
            .parse()
            .map_err(|_| EntryFormError::InvalidMood(raw.to_string()))?;

        if !mood.is_finite() {
            return Err(EntryFormError::InvalidMood(raw.to_string()));
        }
        if !(MOOD_MIN..=MOOD_MAX).contains(&mood) {
            return Err(EntryFormError::MoodOutOfRange(mood));
        }

        let note = self.note.trim();
        Ok(NewEntry {
            mood,
            note: (!note.is_empty()).then(|| note.to_string()),
        })
    }
}
