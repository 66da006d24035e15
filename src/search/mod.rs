//! Web search tool used by the researcher stage

pub mod duckduckgo;

use async_trait::async_trait;

pub use duckduckgo::DuckDuckGoSearch;

/// Query in, text blob out
#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn run(&self, query: &str) -> Result<String, SearchError>;
}

/// Web search errors
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Upstream returned status {0}")]
    Upstream(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SearchError::Timeout(e.to_string())
        } else if e.is_decode() {
            SearchError::InvalidResponse(e.to_string())
        } else if let Some(status) = e.status() {
            SearchError::Upstream(status.as_u16())
        } else {
            SearchError::RequestFailed(e.to_string())
        }
    }
}
