//! Application shell error types

use thiserror::Error;

use crate::api::ApiError;
use crate::session::StorageError;

/// Which credential exchange failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Signup,
}

impl AuthAction {
    /// Generic message shown to the user, with no server detail
    pub fn failure_message(&self) -> &'static str {
        match self {
            AuthAction::Login => "Login failed",
            AuthAction::Signup => "Signup failed",
        }
    }
}

impl std::fmt::Display for AuthAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthAction::Login => write!(f, "Login"),
            AuthAction::Signup => write!(f, "Signup"),
        }
    }
}

/// Errors returned by shell operations
#[derive(Error, Debug)]
pub enum AppError {
    /// Operation needs a session token and there is none
    #[error("Not logged in")]
    NotAuthenticated,

    /// Credential exchange rejected or failed in transit
    #[error("{action} failed: {source}")]
    AuthFailed {
        action: AuthAction,
        #[source]
        source: ApiError,
    },

    /// Journal API call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Client storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    /// Whether the server rejected the session token
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AppError::Api(ApiError::Unauthorized)
                | AppError::AuthFailed {
                    source: ApiError::Unauthorized,
                    ..
                }
        )
    }
}

/// Result type for shell operations
pub type AppResult<T> = Result<T, AppError>;
