//! Citation existence, metadata, plausibility and link checks

use super::extract::extract_citations;
use crate::config::ScholarlyConfig;
use crate::metrics::METRICS;
use crate::scholarly::{MetadataSource, PaperRecord, ScholarlyError};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const ISSUE_NOT_FOUND: &str = "Citation not found in academic databases";
pub const ISSUE_INCOMPLETE_METADATA: &str = "Incomplete metadata (missing title/year/DOI)";
pub const ISSUE_SUSPICIOUS: &str = "Citation appears semantically suspicious";
pub const ISSUE_LINK_UNREACHABLE: &str = "DOI or source link not reachable";

/// Substrings that mark a citation as a placeholder
const SUSPICIOUS_TERMS: [&str; 5] = ["unknown", "anonymous", "example", "test paper", "lorem ipsum"];

/// Outcome of validating one citation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CitationReport {
    pub citation: String,
    pub exists: bool,
    pub metadata_complete: bool,
    pub semantic_valid: bool,
    pub link_valid: bool,
    pub issues: Vec<String>,
}

impl CitationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Case-insensitive denylist check
pub fn is_semantically_plausible(citation: &str) -> bool {
    let lowered = citation.to_lowercase();
    !SUSPICIOUS_TERMS.iter().any(|term| lowered.contains(term))
}

/// Validates citations against a primary and a fallback metadata source
pub struct CitationValidator {
    primary: Arc<dyn MetadataSource>,
    fallback: Arc<dyn MetadataSource>,
    http: Client,
    doi_resolver_url: String,
}

impl CitationValidator {
    pub fn new(
        primary: Arc<dyn MetadataSource>,
        fallback: Arc<dyn MetadataSource>,
        config: &ScholarlyConfig,
    ) -> Result<Self, ScholarlyError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ScholarlyError::Initialization(e.to_string()))?;

        Ok(Self {
            primary,
            fallback,
            http,
            doi_resolver_url: config.doi_resolver_url.trim_end_matches('/').to_string(),
        })
    }

    /// First record from the primary source, else from the fallback
    async fn lookup(&self, citation: &str) -> Option<PaperRecord> {
        for source in [&self.primary, &self.fallback] {
            match source.search(citation, 1).await {
                Ok(records) => match records.into_iter().next() {
                    Some(record) => return Some(record),
                    None => debug!("{} returned no records", source.name()),
                },
                Err(e) => warn!("{} lookup failed: {}", source.name(), e),
            }
        }
        None
    }

    /// Whether `<resolver>/<doi>` answers below 400
    pub async fn check_doi_link(&self, doi: &str) -> bool {
        let url = format!("{}/{}", self.doi_resolver_url, doi);
        let ok = match self.http.get(&url).send().await {
            Ok(response) => response.status().as_u16() < 400,
            Err(e) => {
                warn!("DOI resolution failed for {}: {}", doi, e);
                false
            }
        };
        METRICS.record_external_call("doi_resolver", ok);
        ok
    }

    /// Validate a single citation; external failures only downgrade flags
    pub async fn validate(&self, citation: &str) -> CitationReport {
        let record = self.lookup(citation).await;

        let exists = record.is_some();
        let metadata_complete = record
            .as_ref()
            .is_some_and(|r| r.has_title() && r.has_year());
        let semantic_valid = is_semantically_plausible(citation);
        let link_valid = match record.as_ref().and_then(PaperRecord::doi) {
            Some(doi) => self.check_doi_link(doi).await,
            None => false,
        };

        let mut issues = Vec::new();
        if !exists {
            issues.push(ISSUE_NOT_FOUND.to_string());
        }
        if !metadata_complete {
            issues.push(ISSUE_INCOMPLETE_METADATA.to_string());
        }
        if !semantic_valid {
            issues.push(ISSUE_SUSPICIOUS.to_string());
        }
        if !link_valid {
            issues.push(ISSUE_LINK_UNREACHABLE.to_string());
        }

        let report = CitationReport {
            citation: citation.to_string(),
            exists,
            metadata_complete,
            semantic_valid,
            link_valid,
            issues,
        };
        METRICS.record_citation_report(report.is_clean());
        report
    }

    /// Extract every citation from `text` and validate them one by one
    pub async fn validate_text(&self, text: &str) -> Vec<CitationReport> {
        let citations = extract_citations(text);
        info!("Validating {} citations", citations.len());

        let mut reports = Vec::with_capacity(citations.len());
        for citation in &citations {
            reports.push(self.validate(citation).await);
        }
        reports
    }
}
