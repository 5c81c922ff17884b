//! # Mood Journal
//!
//! Digital Mood Co-Worker - a client for a personal mood-journaling service.
//! Log in, record how your day went, and review averages and trends.
//!
//! ## Modules
//!
//! - [`app`]: Application shell owning the session and loaded entries
//! - [`api`]: Journal REST API client
//! - [`journal`]: Entry types and derived statistics
//! - [`session`]: Session token and durable client storage
//! - [`ui`]: Auth panel, entry form, chart and text rendering
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mood_journal::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let api = ApiClient::new(ApiClientConfig::from(&config))?;
//!     let storage = FileStorage::new(config.storage.storage_file());
//!
//!     let mut app = App::restore(api, storage);
//!     if app.start().await.is_none() {
//!         app.login(LoginRequest::new("ada@example.com", "hunter2")).await?;
//!     }
//!
//!     app.add_entry(NewEntry::new(8.0).note("Shipped the release")).await?;
//!
//!     let summary = app.summary();
//!     println!("{} entries, average {:?}", summary.count, summary.average_mood);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod journal;
pub mod session;
pub mod ui;

// Re-export top-level types for convenience
pub use api::{
    ApiClient, ApiClientConfig, ApiError, ApiResult, JournalApi, LoginRequest, SignupRequest,
};

pub use app::{Alert, App, AppError, AppResult, AuthAction, Refresh, View};

pub use config::{Config, ConfigError, LoggingConfig};

pub use journal::{MoodEntry, NewEntry, Summary};

pub use session::{
    ClientStorage, FileStorage, MemoryStorage, Session, SessionToken, StorageError, TOKEN_KEY,
};

pub use ui::{AuthField, AuthMode, AuthPanel, EntryForm, EntryFormError};
