//! Session management
//!
//! The session token is owned by a single [`Session`] held by the
//! application shell and handed by reference to every authenticated call.
//! Synchronising it with durable storage is always an explicit call.

mod storage;

pub use storage::{ClientStorage, FileStorage, MemoryStorage, StorageError, StorageResult};

use serde::{Deserialize, Serialize};

/// Fixed storage key under which the token is persisted
pub const TOKEN_KEY: &str = "token";

/// Opaque credential issued by the server on successful authentication
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// In-memory session state
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<SessionToken>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the session from durable storage
    pub fn load(storage: &impl ClientStorage) -> StorageResult<Self> {
        let token = storage
            .get_item(TOKEN_KEY)?
            .filter(|t| !t.is_empty())
            .map(SessionToken::new);
        Ok(Self { token })
    }

    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Replace the in-memory token. Storage is not touched.
    pub fn set_token(&mut self, token: SessionToken) {
        self.token = Some(token);
    }

    /// Write the current token to durable storage, or remove it when signed out
    pub fn persist(&self, storage: &impl ClientStorage) -> StorageResult<()> {
        match &self.token {
            Some(token) => storage.set_item(TOKEN_KEY, token.as_str()),
            None => storage.remove_item(TOKEN_KEY),
        }
    }

    /// Drop the token from memory. Storage is not touched.
    pub fn clear(&mut self) {
        self.token = None;
    }
}
