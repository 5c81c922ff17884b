//! API Error Types
//!
//! Errors that can occur while talking to the journal API. The variants
//! separate transport failures from server rejections so callers can decide
//! what to surface.

use thiserror::Error;

/// Errors that can occur when communicating with the journal API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Could not connect to the server
    #[error("Journal API unavailable")]
    Unavailable,

    /// Request did not complete within the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Credentials rejected or session token expired (HTTP 401)
    #[error("Unauthorized")]
    Unauthorized,

    /// Server answered with a non-success status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Any other transport or decoding failure
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// HTTP client could not be built
    #[error("Client error: {0}")]
    Client(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Unavailable
        } else {
            ApiError::Request(err)
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
