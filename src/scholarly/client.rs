//! CrossRef and Semantic Scholar search clients

use super::models::{CrossrefResponse, PaperRecord, SemanticScholarResponse};
use crate::config::ScholarlyConfig;
use crate::metrics::METRICS;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use tracing::{debug, warn};

/// Scholarly metadata errors
#[derive(Debug, thiserror::Error)]
pub enum ScholarlyError {
    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Upstream returned status {0}")]
    Upstream(u16),

    #[error("Rate limit exceeded after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ScholarlyError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ScholarlyError::Timeout(e.to_string())
        } else if e.is_decode() {
            ScholarlyError::InvalidResponse(e.to_string())
        } else if let Some(status) = e.status() {
            ScholarlyError::Upstream(status.as_u16())
        } else {
            ScholarlyError::RequestFailed(e.to_string())
        }
    }
}

/// A searchable bibliographic metadata source
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Short name used in logs and metrics
    fn name(&self) -> &'static str;

    /// Search for records matching free text, best match first
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PaperRecord>, ScholarlyError>;
}

fn build_http(config: &ScholarlyConfig) -> Result<Client, ScholarlyError> {
    Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| ScholarlyError::Initialization(e.to_string()))
}

/// CrossRef `/works` client
pub struct CrossrefClient {
    http: Client,
    base_url: String,
    mailto: String,
}

impl CrossrefClient {
    pub fn new(config: &ScholarlyConfig) -> Result<Self, ScholarlyError> {
        Ok(Self {
            http: build_http(config)?,
            base_url: config.crossref_url.clone(),
            mailto: config.mailto.clone(),
        })
    }

    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<PaperRecord>, ScholarlyError> {
        let rows = limit.to_string();
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("query", query),
                ("rows", rows.as_str()),
                ("mailto", self.mailto.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: CrossrefResponse = response.json().await?;
        Ok(body.message.items.into_iter().map(PaperRecord::from).collect())
    }
}

#[async_trait]
impl MetadataSource for CrossrefClient {
    fn name(&self) -> &'static str {
        "crossref"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PaperRecord>, ScholarlyError> {
        debug!("CrossRef search: rows={}", limit);
        let result = self.fetch(query, limit).await;
        METRICS.record_external_call(self.name(), result.is_ok());
        result
    }
}

/// Semantic Scholar paper search client with rate-limit backoff
pub struct SemanticScholarClient {
    http: Client,
    config: ScholarlyConfig,
}

const SEMANTIC_SCHOLAR_FIELDS: &str = "title,abstract,year,externalIds";

impl SemanticScholarClient {
    pub fn new(config: &ScholarlyConfig) -> Result<Self, ScholarlyError> {
        Ok(Self {
            http: build_http(config)?,
            config: config.clone(),
        })
    }

    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<PaperRecord>, ScholarlyError> {
        let limit = limit.to_string();
        let attempts = self.config.rate_limit_attempts;

        let mut response = None;
        for attempt in 0..attempts {
            let mut req = self.http.get(&self.config.semantic_scholar_url).query(&[
                ("query", query),
                ("limit", limit.as_str()),
                ("fields", SEMANTIC_SCHOLAR_FIELDS),
            ]);
            if let Some(ref key) = self.config.semantic_scholar_api_key {
                req = req.header("x-api-key", key.expose_secret());
            }

            let resp = req.send().await?;
            if resp.status() == StatusCode::TOO_MANY_REQUESTS {
                let backoff = self.config.rate_limit_backoff() * (attempt + 1);
                warn!(
                    "Semantic Scholar rate limited (attempt {}/{}), backing off {:?}",
                    attempt + 1,
                    attempts,
                    backoff
                );
                tokio::time::sleep(backoff).await;
                continue;
            }

            response = Some(resp.error_for_status()?);
            break;
        }

        let response = response.ok_or(ScholarlyError::RateLimited { attempts })?;
        let body: SemanticScholarResponse = response.json().await?;
        Ok(body.data.into_iter().map(PaperRecord::from).collect())
    }
}

#[async_trait]
impl MetadataSource for SemanticScholarClient {
    fn name(&self) -> &'static str {
        "semantic_scholar"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PaperRecord>, ScholarlyError> {
        debug!("Semantic Scholar search: limit={}", limit);
        let result = self.fetch(query, limit).await;
        METRICS.record_external_call(self.name(), result.is_ok());
        result
    }
}
