//! Application Shell
//!
//! Owns the session and the loaded entries, orchestrates calls to the
//! journal API and derives what the user sees.
//!
//! ## Data Flow
//!
//! 1. `restore` reads the token from client storage
//! 2. `start` fetches entries when a token is present
//! 3. `login`/`signup` store a fresh token, persist it, then refresh entries
//! 4. `add_entry` posts the entry, then refreshes entries from the server
//!
//! Entries are only ever replaced wholesale by a successful fetch. Writes
//! never touch the local list directly (refresh-after-write).

mod error;

pub use error::{AppError, AppResult, AuthAction};

use crate::api::{ApiResult, JournalApi, LoginRequest, SignupRequest};
use crate::journal::{MoodEntry, NewEntry, Summary};
use crate::session::{ClientStorage, Session, SessionToken};
use crate::ui::{AuthPanel, AuthRequest};

/// Blocking message the front end must show before continuing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of the entries refresh that follows a login or a write
#[derive(Debug)]
pub enum Refresh {
    /// Entries replaced with this many entries from the server
    Loaded(usize),
    /// Refresh failed; the previous entries are still shown
    Stale(AppError),
}

impl Refresh {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Refresh::Loaded(_))
    }
}

/// What the front end should render
#[derive(Debug)]
pub enum View<'a> {
    /// Signed out: show the auth panel
    Auth(&'a AuthPanel),
    /// Signed in: entry form, insight panel, chart
    Journal {
        /// `None` exactly when there are no entries; the insight panel is hidden
        summary: Option<Summary>,
        entries: &'a [MoodEntry],
    },
}

/// The application shell
pub struct App<A, S> {
    api: A,
    storage: S,
    session: Session,
    entries: Vec<MoodEntry>,
    auth_panel: AuthPanel,
    alert: Option<Alert>,
}

impl<A: JournalApi, S: ClientStorage> App<A, S> {
    /// Build the shell, restoring any session saved in client storage
    ///
    /// An unreadable storage is treated as signed out.
    pub fn restore(api: A, storage: S) -> Self {
        let session = Session::load(&storage).unwrap_or_else(|e| {
            tracing::warn!("Failed to restore session from client storage: {}", e);
            Session::new()
        });

        Self {
            api,
            storage,
            session,
            entries: Vec::new(),
            auth_panel: AuthPanel::new(),
            alert: None,
        }
    }

    /// Initial load: fetch entries if a session was restored
    pub async fn start(&mut self) -> Option<Refresh> {
        if !self.session.is_authenticated() {
            tracing::debug!("No stored session, showing auth panel");
            return None;
        }
        Some(self.refresh().await)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn auth_panel(&self) -> &AuthPanel {
        &self.auth_panel
    }

    pub fn auth_panel_mut(&mut self) -> &mut AuthPanel {
        &mut self.auth_panel
    }

    /// Pending blocking alert, if any
    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Take the pending alert, clearing it
    pub fn take_alert(&mut self) -> Option<Alert> {
        self.alert.take()
    }

    /// Replace the entries with the server's current list
    ///
    /// On failure the previous entries are kept and the error is returned.
    pub async fn fetch_entries(&mut self) -> AppResult<usize> {
        let token = self.session.token().ok_or(AppError::NotAuthenticated)?;

        match self.api.list_entries(token).await {
            Ok(entries) => {
                let count = entries.len();
                self.entries = entries;
                tracing::info!("Loaded {} mood entries", count);
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Failed to fetch entries, keeping {} cached",
                    self.entries.len()
                );
                Err(e.into())
            }
        }
    }

    pub async fn login(&mut self, request: LoginRequest) -> AppResult<Refresh> {
        let result = self.api.login(&request).await;
        self.authenticate(AuthAction::Login, result).await
    }

    pub async fn signup(&mut self, request: SignupRequest) -> AppResult<Refresh> {
        let result = self.api.signup(&request).await;
        self.authenticate(AuthAction::Signup, result).await
    }

    /// Submit the auth panel's draft in its current mode
    pub async fn submit_auth(&mut self) -> AppResult<Refresh> {
        match self.auth_panel.submit() {
            AuthRequest::Login(request) => self.login(request).await,
            AuthRequest::Signup(request) => self.signup(request).await,
        }
    }

    async fn authenticate(
        &mut self,
        action: AuthAction,
        result: ApiResult<SessionToken>,
    ) -> AppResult<Refresh> {
        let token = match result {
            Ok(token) => token,
            Err(source) => {
                tracing::warn!(%action, error = %source, "Authentication failed");
                self.alert = Some(Alert {
                    message: action.failure_message().to_string(),
                });
                return Err(AppError::AuthFailed { action, source });
            }
        };

        tracing::info!(%action, "Authenticated");
        self.session.set_token(token);
        self.session.persist(&self.storage)?;

        Ok(self.refresh().await)
    }

    /// Post a new entry, then reload the list from the server
    pub async fn add_entry(&mut self, entry: NewEntry) -> AppResult<Refresh> {
        let token = self.session.token().ok_or(AppError::NotAuthenticated)?;

        if let Err(e) = self.api.create_entry(token, &entry).await {
            tracing::warn!(error = %e, mood = entry.mood, "Failed to save entry");
            return Err(e.into());
        }

        tracing::info!(mood = entry.mood, "Entry saved");
        Ok(self.refresh().await)
    }

    /// Forget the session in memory and in client storage
    /// Sign out, removing the stored token first
    ///
    /// When storage cannot be updated nothing changes in memory, so the
    /// session a later restore would find stays the one shown.
    pub fn logout(&mut self) -> AppResult<()> {
        Session::new().persist(&self.storage)?;
        self.session.clear();
        self.entries.clear();
        tracing::info!("Logged out");
        Ok(())
    }

    /// Statistics over the loaded entries
    pub fn summary(&self) -> Summary {
        Summary::from_entries(&self.entries)
    }

    pub fn view(&self) -> View<'_> {
        if !self.session.is_authenticated() {
            return View::Auth(&self.auth_panel);
        }

        View::Journal {
            summary: (!self.entries.is_empty()).then(|| self.summary()),
            entries: &self.entries,
        }
    }

    async fn refresh(&mut self) -> Refresh {
        match self.fetch_entries().await {
            Ok(count) => Refresh::Loaded(count),
            Err(e) => Refresh::Stale(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::session::{MemoryStorage, StorageError, StorageResult, TOKEN_KEY};
    use crate::ui::AuthField;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    const TOKEN: &str = "server-token";

    #[derive(Default)]
    struct FakeState {
        entries: Vec<MoodEntry>,
        reject_auth: bool,
        fail_list: bool,
        fail_create: bool,
        list_calls: usize,
        created: Vec<NewEntry>,
    }

    /// In-memory journal service; clones share state
    #[derive(Clone, Default)]
    struct FakeApi {
        state: Arc<Mutex<FakeState>>,
    }

    impl FakeApi {
        fn with_moods(moods: &[f64]) -> Self {
            let api = Self::default();
            let start = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();
            api.state().entries = moods
                .iter()
                .enumerate()
                .map(|(i, &m)| MoodEntry::new(start + Duration::days(i as i64), m))
                .collect();
            api
        }

        fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
            self.state.lock().unwrap()
        }

        fn check(&self, token: &SessionToken) -> ApiResult<()> {
            if token.as_str() == TOKEN {
                Ok(())
            } else {
                Err(ApiError::Unauthorized)
            }
        }

        fn issue(&self) -> ApiResult<SessionToken> {
            if self.state().reject_auth {
                Err(ApiError::Unauthorized)
            } else {
                Ok(SessionToken::new(TOKEN))
            }
        }
    }

    #[async_trait]
    impl JournalApi for FakeApi {
        async fn login(&self, _request: &LoginRequest) -> ApiResult<SessionToken> {
            self.issue()
        }

        async fn signup(&self, _request: &SignupRequest) -> ApiResult<SessionToken> {
            self.issue()
        }

        async fn list_entries(&self, token: &SessionToken) -> ApiResult<Vec<MoodEntry>> {
            self.check(token)?;
            let mut state = self.state();
            state.list_calls += 1;
            if state.fail_list {
                return Err(ApiError::Status {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(state.entries.clone())
        }

        async fn create_entry(&self, token: &SessionToken, entry: &NewEntry) -> ApiResult<()> {
            self.check(token)?;
            let mut state = self.state();
            if state.fail_create {
                return Err(ApiError::Unavailable);
            }
            state.created.push(entry.clone());
            let date = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
            let mut stored = MoodEntry::new(date, entry.mood);
            stored.note = entry.note.clone();
            state.entries.push(stored);
            Ok(())
        }
    }

    fn signed_in(api: FakeApi) -> (App<FakeApi, MemoryStorage>, MemoryStorage) {
        let storage = MemoryStorage::new();
        storage.set_item(TOKEN_KEY, TOKEN).unwrap();
        (App::restore(api, storage.clone()), storage)
    }

    #[tokio::test]
    async fn test_start_without_session_shows_auth() {
        let api = FakeApi::with_moods(&[5.0]);
        let mut app = App::restore(api.clone(), MemoryStorage::new());

        assert!(app.start().await.is_none());
        assert!(matches!(app.view(), View::Auth(_)));
        assert_eq!(api.state().list_calls, 0);
    }

    #[tokio::test]
    async fn test_start_with_stored_token_fetches() {
        let (mut app, _) = signed_in(FakeApi::with_moods(&[8.0, 6.0, 10.0]));

        let refresh = app.start().await.unwrap();
        assert!(matches!(refresh, Refresh::Loaded(3)));

        match app.view() {
            View::Journal { summary, entries } => {
                let summary = summary.unwrap();
                assert_eq!(entries.len(), 3);
                assert_eq!(summary.count, 3);
                assert_eq!(summary.average_display().as_deref(), Some("8.0"));
                assert_eq!(summary.latest_entry.map(|e| e.mood), Some(10.0));
            }
            View::Auth(_) => panic!("expected journal view"),
        }
    }

    #[tokio::test]
    async fn test_empty_entries_hide_summary() {
        let (mut app, _) = signed_in(FakeApi::default());
        app.start().await;

        match app.view() {
            View::Journal { summary, entries } => {
                assert!(summary.is_none());
                assert!(entries.is_empty());
            }
            View::Auth(_) => panic!("expected journal view"),
        }
    }

    #[tokio::test]
    async fn test_login_stores_token_and_fetches_once() {
        let api = FakeApi::with_moods(&[7.0]);
        let storage = MemoryStorage::new();
        let mut app = App::restore(api.clone(), storage.clone());

        let refresh = app
            .login(LoginRequest::new("ada@example.com", "hunter2"))
            .await
            .unwrap();

        assert!(refresh.is_loaded());
        assert_eq!(app.session().token().map(SessionToken::as_str), Some(TOKEN));
        assert_eq!(storage.get_item(TOKEN_KEY).unwrap().as_deref(), Some(TOKEN));
        assert_eq!(api.state().list_calls, 1);
        assert_eq!(app.entries().len(), 1);
        assert!(app.alert().is_none());
    }

    #[tokio::test]
    async fn test_failed_login_raises_alert_and_keeps_token() {
        let api = FakeApi::default();
        api.state().reject_auth = true;
        let storage = MemoryStorage::new();
        let mut app = App::restore(api.clone(), storage.clone());

        let err = app
            .login(LoginRequest::new("ada@example.com", "wrong"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::AuthFailed {
                action: AuthAction::Login,
                ..
            }
        ));
        assert!(!app.session().is_authenticated());
        assert_eq!(storage.get_item(TOKEN_KEY).unwrap(), None);
        assert_eq!(api.state().list_calls, 0);
        assert_eq!(app.take_alert().map(|a| a.message), Some("Login failed".to_string()));
        assert!(app.alert().is_none());
    }

    #[tokio::test]
    async fn test_failed_signup_alert() {
        let api = FakeApi::default();
        api.state().reject_auth = true;
        let mut app = App::restore(api, MemoryStorage::new());

        assert!(app
            .signup(SignupRequest::new("Ada", "ada@example.com", "pw"))
            .await
            .is_err());
        assert_eq!(app.alert().map(|a| a.to_string()), Some("Signup failed".to_string()));
    }

    #[tokio::test]
    async fn test_login_with_failing_fetch_reports_stale() {
        let api = FakeApi::default();
        api.state().fail_list = true;
        let mut app = App::restore(api.clone(), MemoryStorage::new());

        let refresh = app.login(LoginRequest::new("a", "b")).await.unwrap();
        assert!(matches!(refresh, Refresh::Stale(AppError::Api(_))));
        assert!(app.session().is_authenticated());
        assert_eq!(api.state().list_calls, 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_entries() {
        let api = FakeApi::with_moods(&[4.0, 6.0]);
        let (mut app, _) = signed_in(api.clone());
        app.fetch_entries().await.unwrap();
        let before = app.entries().to_vec();

        api.state().fail_list = true;
        api.state().entries.clear();
        assert!(app.fetch_entries().await.is_err());
        assert_eq!(app.entries(), before.as_slice());
    }

    #[tokio::test]
    async fn test_fetch_requires_session() {
        let mut app = App::restore(FakeApi::default(), MemoryStorage::new());
        assert!(matches!(
            app.fetch_entries().await,
            Err(AppError::NotAuthenticated)
        ));
        assert!(matches!(
            app.add_entry(NewEntry::new(5.0)).await,
            Err(AppError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_add_entry_refetches() {
        let api = FakeApi::with_moods(&[6.0]);
        let (mut app, _) = signed_in(api.clone());
        app.start().await;
        assert_eq!(api.state().list_calls, 1);

        let refresh = app.add_entry(NewEntry::new(9.0).note("promotion")).await.unwrap();

        assert!(matches!(refresh, Refresh::Loaded(2)));
        assert_eq!(api.state().list_calls, 2);
        assert_eq!(api.state().created, vec![NewEntry::new(9.0).note("promotion")]);
        assert_eq!(app.entries().last().and_then(|e| e.note.as_deref()), Some("promotion"));
        assert_eq!(app.summary().average_mood, Some(7.5));
    }

    #[tokio::test]
    async fn test_failed_add_entry_does_not_refetch() {
        let api = FakeApi::with_moods(&[6.0]);
        let (mut app, _) = signed_in(api.clone());
        app.start().await;

        api.state().fail_create = true;
        let err = app.add_entry(NewEntry::new(3.0)).await.unwrap_err();

        assert!(matches!(err, AppError::Api(ApiError::Unavailable)));
        assert_eq!(api.state().list_calls, 1);
        assert_eq!(app.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_expired_token_surfaces_unauthorized() {
        let storage = MemoryStorage::new();
        storage.set_item(TOKEN_KEY, "stale-token").unwrap();
        let mut app = App::restore(FakeApi::with_moods(&[5.0]), storage);

        let err = app.fetch_entries().await.unwrap_err();
        assert!(err.is_unauthorized());
        // Token is kept; the user decides whether to log in again
        assert!(app.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_storage() {
        let (mut app, storage) = signed_in(FakeApi::with_moods(&[5.0]));
        app.start().await;

        app.logout().unwrap();

        assert!(!app.session().is_authenticated());
        assert!(app.entries().is_empty());
        assert_eq!(storage.get_item(TOKEN_KEY).unwrap(), None);
        assert!(matches!(app.view(), View::Auth(_)));
    }

    #[tokio::test]
    async fn test_submit_auth_uses_panel_draft() {
        let api = FakeApi::with_moods(&[5.0]);
        let mut app = App::restore(api.clone(), MemoryStorage::new());

        let panel = app.auth_panel_mut();
        panel.set_field(AuthField::Email, "ada@example.com");
        panel.set_field(AuthField::Password, "hunter2");

        app.submit_auth().await.unwrap();
        assert!(app.session().is_authenticated());
        assert_eq!(app.auth_panel().field(AuthField::Email), None);
    }

    struct BrokenStorage;

    impl ClientStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Serialization("corrupt".to_string()))
        }

        fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }

        fn remove_item(&self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_unreadable_storage_means_signed_out() {
        let api = FakeApi::with_moods(&[5.0]);
        let mut app = App::restore(api.clone(), BrokenStorage);
        assert!(!app.session().is_authenticated());

        // Token is kept in memory but the failed write is reported and no fetch is made
        let err = app.login(LoginRequest::new("a", "b")).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert!(app.session().is_authenticated());
        assert_eq!(api.state().list_calls, 0);
    }

    /// Readable storage whose removals fail
    #[derive(Clone, Default)]
    struct StickyStorage(MemoryStorage);

    impl ClientStorage for StickyStorage {
        fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
            self.0.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
            self.0.set_item(key, value)
        }

        fn remove_item(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    #[tokio::test]
    async fn test_failed_logout_keeps_session() {
        let storage = StickyStorage::default();
        storage.set_item(TOKEN_KEY, TOKEN).unwrap();
        let mut app = App::restore(FakeApi::with_moods(&[5.0]), storage.clone());
        app.start().await;

        let err = app.logout().unwrap_err();

        assert!(matches!(err, AppError::Storage(_)));
        assert!(app.session().is_authenticated());
        assert_eq!(app.entries().len(), 1);
        assert_eq!(storage.get_item(TOKEN_KEY).unwrap().as_deref(), Some(TOKEN));
    }
}
