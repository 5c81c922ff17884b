//! Journal API
//!
//! Client side of the remote journal service.
//!
//! # Endpoints
//!
//! ## Auth
//! - `POST /auth/login` - Exchange email/password for a token
//! - `POST /auth/signup` - Create an account and receive a token
//!
//! ## Entries (Bearer token)
//! - `GET /entries` - List all entries in chronological order
//! - `POST /entries` - Add an entry
//!
//! The [`JournalApi`] trait is the seam between the application shell and
//! the network; [`ApiClient`] is the reqwest implementation.

pub mod client;
pub mod dto;
pub mod error;

pub use client::{ApiClient, ApiClientConfig};
pub use dto::{LoginRequest, SignupRequest, TokenResponse};
pub use error::{ApiError, ApiResult};

use async_trait::async_trait;

use crate::journal::{MoodEntry, NewEntry};
use crate::session::SessionToken;

/// Operations the application shell needs from the journal service
#[async_trait]
pub trait JournalApi: Send + Sync {
    /// Exchange credentials for a session token
    async fn login(&self, request: &LoginRequest) -> ApiResult<SessionToken>;

    /// Register a new account and receive a session token
    async fn signup(&self, request: &SignupRequest) -> ApiResult<SessionToken>;

    /// Fetch the whole entries collection
    async fn list_entries(&self, token: &SessionToken) -> ApiResult<Vec<MoodEntry>>;

    /// Submit a new entry. The response body is ignored.
    async fn create_entry(&self, token: &SessionToken, entry: &NewEntry) -> ApiResult<()>;
}
