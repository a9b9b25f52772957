//! HTTP clients for the CereStyle external services.
//!
//! Provides a minimal shared client with configurable auth and JSON
//! GET / multipart POST helpers, plus the two service clients built on it:
//! [`RecommendationClient`] (skin-tone analysis upload) and
//! [`OutfitSearchClient`] (keyed image search).

pub mod analysis;
pub mod outfits;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub use analysis::RecommendationClient;
pub use outfits::{OutfitSearchClient, PhotoSearchResponse};

const USER_AGENT: &str = concat!("cerestyle/", env!("CARGO_PKG_VERSION"));

/// Authentication strategy for a service.
#[derive(Clone)]
pub enum Auth {
    /// No credentials (the analysis service is unauthenticated)
    None,
    /// `Authorization: {key}` with the raw key, as keyed search APIs expect
    ApiKey(String),
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::None => f.write_str("None"),
            Auth::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
        }
    }
}

/// Failure of a single HTTP exchange
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("Failed to send request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response as JSON: {0}")]
    Decode(String),
}

/// HTTP client with configurable auth.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    auth: Auth,
}

impl HttpClient {
    pub fn new(timeout: Duration, auth: Auth) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, auth })
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Auth::None => request,
            Auth::ApiKey(key) => request.header("Authorization", key.as_str()),
        }
    }

    /// GET request with query parameters. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, HttpError> {
        let mut request = self.apply_auth(self.client.get(url));
        if !query.is_empty() {
            request = request.query(query);
        }
        Self::send_json(request).await
    }

    /// POST multipart form and deserialize response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        url: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, HttpError> {
        let request = self.apply_auth(self.client.post(url).multipart(form));
        Self::send_json(request).await
    }

    async fn send_json<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<T, HttpError> {
        let response = request.send().await.map_err(HttpError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(HttpError::Status {
                status: status.as_u16(),
                body: truncate_string(&body, 200),
            });
        }

        let body = response.bytes().await.map_err(HttpError::Transport)?;
        serde_json::from_slice(&body).map_err(|e| HttpError::Decode(e.to_string()))
    }
}

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
