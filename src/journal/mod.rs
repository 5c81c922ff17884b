//! Mood journal domain
//!
//! Entry types as exchanged with the journal API, and the summary
//! statistics derived from the loaded entries.

mod summary;
mod types;

pub use summary::{average_mood, insight_text, Summary};
pub use types::{MoodEntry, NewEntry, MOOD_MAX, MOOD_MIN};
