//! Presentation Layer
//!
//! Form state and text rendering for the terminal front end.
//!
//! - **AuthPanel**: login/signup form
//! - **EntryForm**: new mood entry form
//! - **chart**: bar chart and sparkline of the entries
//! - **render**: full-screen rendering of a shell view

pub mod auth_panel;
pub mod chart;
pub mod entry_form;
pub mod render;

pub use auth_panel::{AuthDraft, AuthField, AuthMode, AuthPanel, AuthRequest};
pub use chart::{render_chart, sparkline};
pub use entry_form::{EntryForm, EntryFormError};
pub use render::{render_entries_table, render_insight, render_view, DEFAULT_CHART_WIDTH};
