//! Journal REST API Client
//!
//! HTTP client for the journal service's auth and entries endpoints.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::dto::{ErrorBody, LoginRequest, SignupRequest, TokenResponse};
use super::error::{ApiError, ApiResult};
use super::JournalApi;
use crate::config::Config;
use crate::journal::{MoodEntry, NewEntry};
use crate::session::SessionToken;

/// Header carrying a per-request correlation id
const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Configuration for the journal API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL including any path prefix (e.g., "http://localhost:4000/api")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: crate::config::DEFAULT_API_URL.to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl From<&Config> for ApiClientConfig {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.api.url.clone(),
            request_timeout_ms: config.api.request_timeout_secs.saturating_mul(1000),
        }
    }
}

/// Journal REST API client
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a new client with the given configuration
    pub fn new(mut config: ApiClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        // Normalize: remove trailing slash
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Start a request tagged with a fresh request id
    fn request(&self, method: Method, path: &str) -> (RequestBuilder, String) {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(request_id = %request_id, %method, path, "Sending journal API request");

        let builder = self
            .client
            .request(method, self.url(path))
            .header(REQUEST_ID_HEADER, &request_id);
        (builder, request_id)
    }

    async fn send(&self, builder: RequestBuilder, request_id: &str) -> ApiResult<Response> {
        let response = builder.send().await.map_err(|e| {
            let err = ApiError::from(e);
            tracing::debug!(request_id = %request_id, error = %err, "Journal API request failed");
            err
        })?;

        let status = response.status();
        tracing::debug!(request_id = %request_id, status = status.as_u16(), "Journal API response");

        if status.is_success() {
            return Ok(response);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or(text);

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        request_id: &str,
    ) -> ApiResult<T> {
        let response = self.send(builder, request_id).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl JournalApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> ApiResult<SessionToken> {
        let (builder, request_id) = self.request(Method::POST, "/auth/login");
        let response: TokenResponse = self.send_json(builder.json(request), &request_id).await?;
        Ok(SessionToken::new(response.token))
    }

    async fn signup(&self, request: &SignupRequest) -> ApiResult<SessionToken> {
        let (builder, request_id) = self.request(Method::POST, "/auth/signup");
        let response: TokenResponse = self.send_json(builder.json(request), &request_id).await?;
        Ok(SessionToken::new(response.token))
    }

    async fn list_entries(&self, token: &SessionToken) -> ApiResult<Vec<MoodEntry>> {
        let (builder, request_id) = self.request(Method::GET, "/entries");
        let builder = builder.header(reqwest::header::AUTHORIZATION, token.bearer());
        self.send_json(builder, &request_id).await
    }

    async fn create_entry(&self, token: &SessionToken, entry: &NewEntry) -> ApiResult<()> {
        let (builder, request_id) = self.request(Method::POST, "/entries");
        let builder = builder
            .header(reqwest::header::AUTHORIZATION, token.bearer())
            .json(entry);
        self.send(builder, &request_id).await?;
        Ok(())
    }
}
