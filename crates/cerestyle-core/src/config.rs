//! Configuration module
//!
//! Endpoint addresses and the image-search API key are static configuration,
//! loaded once and injected into the HTTP clients at construction.

use std::env;
use std::time::Duration;

const DEFAULT_ANALYSIS_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_SEARCH_URL: &str = "https://api.pexels.com/v1/search";
const HTTP_TIMEOUT_SECS: u64 = 60;

/// Client configuration for the analysis and image-search services
#[derive(Clone)]
pub struct StyleConfig {
    /// Base URL of the skin-tone analysis service; `/upload` is appended
    pub analysis_base_url: String,
    /// Full URL of the image-search endpoint
    pub search_url: String,
    /// Sent verbatim in the `Authorization` header of search requests
    pub search_api_key: String,
    pub http_timeout_secs: u64,
}

// Keeps the API key out of logs.
impl std::fmt::Debug for StyleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleConfig")
            .field("analysis_base_url", &self.analysis_base_url)
            .field("search_url", &self.search_url)
            .field("search_api_key", &"<redacted>")
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}

impl StyleConfig {
    pub fn new(
        analysis_base_url: impl Into<String>,
        search_url: impl Into<String>,
        search_api_key: impl Into<String>,
    ) -> Self {
        Self {
            analysis_base_url: analysis_base_url.into().trim_end_matches('/').to_string(),
            search_url: search_url.into(),
            search_api_key: search_api_key.into(),
            http_timeout_secs: HTTP_TIMEOUT_SECS,
        }
    }

    /// Load from environment (and `.env` if present).
    ///
    /// CERESTYLE_ANALYSIS_URL, CERESTYLE_SEARCH_URL, CERESTYLE_SEARCH_API_KEY
    /// (or PEXELS_API_KEY), CERESTYLE_HTTP_TIMEOUT_SECS.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    pub(crate) fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let analysis_base_url = var("CERESTYLE_ANALYSIS_URL")
            .unwrap_or_else(|| DEFAULT_ANALYSIS_URL.to_string());

        let search_url =
            var("CERESTYLE_SEARCH_URL").unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string());

        let search_api_key = var("CERESTYLE_SEARCH_API_KEY")
            .or_else(|| var("PEXELS_API_KEY"))
            .ok_or_else(|| {
                anyhow::anyhow!("CERESTYLE_SEARCH_API_KEY (or PEXELS_API_KEY) must be set")
            })?;

        let http_timeout_secs = match var("CERESTYLE_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                anyhow::anyhow!("CERESTYLE_HTTP_TIMEOUT_SECS must be a valid number")
            })?,
            None => HTTP_TIMEOUT_SECS,
        };

        let config = Self {
            http_timeout_secs,
            ..Self::new(analysis_base_url, search_url, search_api_key)
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.search_api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("Search API key must not be empty"));
        }

        for (name, url) in [
            ("CERESTYLE_ANALYSIS_URL", &self.analysis_base_url),
            ("CERESTYLE_SEARCH_URL", &self.search_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow::anyhow!("{} must be an http(s) URL, got '{}'", name, url));
            }
        }

        if self.http_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "CERESTYLE_HTTP_TIMEOUT_SECS must be greater than zero"
            ));
        }

        Ok(())
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.analysis_base_url)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
