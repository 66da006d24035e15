//! Evidence retrieval from academic metadata sources

use super::ranker;
use crate::metrics::METRICS;
use crate::partial::Partial;
use crate::scholarly::MetadataSource;
use std::sync::Arc;
use tracing::{debug, warn};

/// Records requested from each source per claim
pub const ROWS_PER_SOURCE: usize = 5;

/// Collects snippets for a claim from every source, then ranks them
pub struct EvidenceRetriever {
    sources: Vec<Arc<dyn MetadataSource>>,
}

impl EvidenceRetriever {
    pub fn new(sources: Vec<Arc<dyn MetadataSource>>) -> Self {
        Self { sources }
    }

    /// Ranked evidence snippets for `claim`.
    ///
    /// Sources are queried one after another; a failing source is recorded
    /// as skipped and the remaining sources still contribute.
    pub async fn search_evidence(&self, claim: &str) -> Partial<String> {
        let mut evidence = Partial::new();

        for source in &self.sources {
            match source.search(claim, ROWS_PER_SOURCE).await {
                Ok(records) => {
                    let before = evidence.items.len();
                    evidence.extend(records.iter().filter_map(|r| r.evidence_text()));
                    debug!(
                        "{} returned {} evidence snippets",
                        source.name(),
                        evidence.items.len() - before
                    );
                }
                Err(e) => {
                    warn!("{} search failed: {}", source.name(), e);
                    evidence.skip(source.name(), e);
                }
            }
        }

        METRICS.record_skipped("evidence_sources", evidence.skipped_count());
        evidence.map_items(|items| ranker::rank(&items, claim))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scholarly::{PaperRecord, RecordSource, ScholarlyError};
    use async_trait::async_trait;

    struct FixedSource(Vec<&'static str>);

    #[async_trait]
    impl MetadataSource for FixedSource {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn search(&self, _q: &str, _limit: usize) -> Result<Vec<PaperRecord>, ScholarlyError> {
            Ok(self
                .0
                .iter()
                .map(|t| PaperRecord {
                    source: RecordSource::Crossref,
                    title: Some(t.to_string()),
                    doi: None,
                    year: None,
                    abstract_text: None,
                })
                .collect())
        }
    }

    struct RateLimitedSource;

    #[async_trait]
    impl MetadataSource for RateLimitedSource {
        fn name(&self) -> &'static str {
            "limited"
        }

        async fn search(&self, _q: &str, _limit: usize) -> Result<Vec<PaperRecord>, ScholarlyError> {
            Err(ScholarlyError::RateLimited { attempts: 3 })
        }
    }

    #[tokio::test]
    async fn test_failing_source_is_skipped() {
        let sources: Vec<Arc<dyn MetadataSource>> = vec![
            Arc::new(RateLimitedSource),
            Arc::new(FixedSource(vec!["unrelated", "graphene conducts heat"])),
        ];
        let retriever = EvidenceRetriever::new(sources);

        let evidence = retriever.search_evidence("graphene conducts heat well").await;
        assert_eq!(evidence.items[0], "graphene conducts heat");
        assert_eq!(evidence.skipped_count(), 1);
        assert_eq!(evidence.skipped[0].item, "limited");
    }

    #[tokio::test]
    async fn test_results_from_all_sources_are_ranked_together() {
        let sources: Vec<Arc<dyn MetadataSource>> = vec![
            Arc::new(FixedSource(vec!["a", "b", "c"])),
            Arc::new(FixedSource(vec!["d", "e", "claim match"])),
        ];
        let retriever = EvidenceRetriever::new(sources);

        let evidence = retriever.search_evidence("claim match").await;
        assert_eq!(evidence.items.len(), ranker::TOP_K);
        assert_eq!(evidence.items[0], "claim match");
    }
}
