//! Backend search service client.

use thiserror::Error;
use tracing::debug;

use crate::config::SearchConfig;
use crate::types::{SearchRequest, SearchResult};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP status: {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// The search service as seen by the controller.
#[allow(async_fn_in_trait)]
pub trait SearchBackend {
    async fn suggestions(&self, query: &str) -> Result<Vec<String>, BackendError>;
    async fn search(&self, request: &SearchRequest) -> Result<SearchResult, BackendError>;
}

/// [`SearchBackend`] over HTTP + JSON.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    search_url: String,
    suggestions_url: String,
}

impl HttpBackend {
    pub fn new(config: &SearchConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("gallery-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        let base = config.base_url.trim_end_matches('/');
        Ok(Self {
            client,
            search_url: format!("{base}{}", config.search_path),
            suggestions_url: format!("{base}{}", config.suggestions_path),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        pairs: &[(&str, String)],
    ) -> Result<T, BackendError> {
        let response = self
            .client
            .get(url)
            .query(pairs)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

impl SearchBackend for HttpBackend {
    async fn suggestions(&self, query: &str) -> Result<Vec<String>, BackendError> {
        debug!(query, "Fetching suggestions");
        self.get_json(&self.suggestions_url, &[("q", query.to_string())])
            .await
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchResult, BackendError> {
        debug!(
            query = request.query.as_str(),
            page = request.page,
            media_type = ?request.media_type,
            "Searching"
        );
        self.get_json(&self.search_url, &request.query_pairs()).await
    }
}
