//! End-to-end claim checking: extract, retrieve evidence, verify

use super::extractor::extract_claims;
use crate::evidence::EvidenceRetriever;
use crate::nli::{ClaimVerification, NliVerifier};
use std::sync::Arc;
use tracing::info;

pub struct ClaimChecker {
    retriever: Arc<EvidenceRetriever>,
    verifier: Arc<NliVerifier>,
}

impl ClaimChecker {
    pub fn new(retriever: Arc<EvidenceRetriever>, verifier: Arc<NliVerifier>) -> Self {
        Self { retriever, verifier }
    }

    /// Verify every claim in `text`, one claim at a time.
    ///
    /// The `skipped` count of each result covers both failed evidence
    /// sources and failed classifications.
    pub async fn check_claims(&self, text: &str) -> Vec<ClaimVerification> {
        let claims = extract_claims(text);
        info!("Checking {} claims", claims.len());

        let mut results = Vec::with_capacity(claims.len());
        for claim in &claims {
            let evidence = self.retriever.search_evidence(claim).await;
            let source_skips = evidence.skipped_count();

            let mut verification = self.verifier.verify_claim(claim, evidence.items).await;
            verification.skipped += source_skips;
            results.push(verification);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nli::{Classification, ClassifierError, VerdictLabel, ZeroShotClassifier};
    use crate::scholarly::{MetadataSource, PaperRecord, RecordSource, ScholarlyError};
    use async_trait::async_trait;

    struct AbstractSource;

    #[async_trait]
    impl MetadataSource for AbstractSource {
        fn name(&self) -> &'static str {
            "abstracts"
        }

        async fn search(&self, query: &str, _limit: usize) -> Result<Vec<PaperRecord>, ScholarlyError> {
            Ok(vec![PaperRecord {
                source: RecordSource::Crossref,
                title: None,
                doi: None,
                year: None,
                abstract_text: Some(format!("<jats:p>{}</jats:p>", query)),
            }])
        }
    }

    struct DownSource;

    #[async_trait]
    impl MetadataSource for DownSource {
        fn name(&self) -> &'static str {
            "down"
        }

        async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<PaperRecord>, ScholarlyError> {
            Err(ScholarlyError::RateLimited { attempts: 3 })
        }
    }

    struct AlwaysEntails;

    #[async_trait]
    impl ZeroShotClassifier for AlwaysEntails {
        async fn classify(
            &self,
            _sequence: &str,
            _labels: &[&str],
            _template: &str,
        ) -> Result<Classification, ClassifierError> {
            Ok(Classification {
                labels: vec!["entailment".to_string()],
                scores: vec![0.9],
            })
        }
    }

    #[tokio::test]
    async fn test_check_claims_counts_source_skips() {
        let sources: Vec<Arc<dyn MetadataSource>> = vec![Arc::new(AbstractSource), Arc::new(DownSource)];
        let retriever = EvidenceRetriever::new(sources);
        let verifier = NliVerifier::new(Arc::new(AlwaysEntails), "This evidence {} the claim.");
        let checker = ClaimChecker::new(Arc::new(retriever), Arc::new(verifier));

        let results = checker
            .check_claims("Marie Curie won two Nobel Prizes in different sciences. Was she French?")
            .await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].verdict.label, VerdictLabel::Entailed);
        assert_eq!(results[0].evidence.len(), 1);
        assert_eq!(results[0].skipped, 1);
    }
}
