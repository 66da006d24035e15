//! Claim verification against evidence snippets

use super::aggregator::aggregate;
use super::classifier::ZeroShotClassifier;
use super::models::{ClaimVerification, NliJudgment, NliLabel};
use crate::metrics::METRICS;
use crate::partial::Partial;
use std::sync::Arc;
use tracing::{debug, warn};

/// Classifies each (claim, evidence) pair and aggregates the judgments
pub struct NliVerifier {
    classifier: Arc<dyn ZeroShotClassifier>,
    hypothesis_template: String,
}

impl NliVerifier {
    pub fn new(classifier: Arc<dyn ZeroShotClassifier>, hypothesis_template: impl Into<String>) -> Self {
        Self {
            classifier,
            hypothesis_template: hypothesis_template.into(),
        }
    }

    fn premise(claim: &str, evidence: &str) -> String {
        format!("Evidence: {}\nClaim: {}", evidence, claim)
    }

    /// One judgment per evidence item; failed items are skipped
    pub async fn judge(&self, claim: &str, evidence: &[String]) -> Partial<NliJudgment> {
        let mut judgments = Partial::new();

        for (idx, item) in evidence.iter().enumerate() {
            let sequence = Self::premise(claim, item);
            let result = self
                .classifier
                .classify(&sequence, &NliLabel::CANDIDATES, &self.hypothesis_template)
                .await;

            let judgment = match result {
                Ok(classification) => match classification.top() {
                    Some((label, score)) => label
                        .parse::<NliLabel>()
                        .map(|label| NliJudgment::new(label, score)),
                    None => Err("empty classification".to_string()),
                },
                Err(e) => Err(e.to_string()),
            };

            match judgment {
                Ok(judgment) => judgments.push(judgment),
                Err(reason) => {
                    warn!("NLI inference failed for evidence #{}: {}", idx, reason);
                    judgments.skip(format!("evidence #{}", idx), reason);
                }
            }
        }

        METRICS.record_skipped("nli_evidence", judgments.skipped_count());
        judgments
    }

    /// Verify a claim against its evidence list
    pub async fn verify_claim(&self, claim: &str, evidence: Vec<String>) -> ClaimVerification {
        let judgments = self.judge(claim, &evidence).await;
        let verdict = aggregate(&judgments.items);

        debug!(
            "Claim verdict {} ({:.3}) from {} judgments",
            verdict.label,
            verdict.confidence,
            judgments.items.len()
        );
        METRICS.record_verdict(verdict.label.as_str());

        ClaimVerification {
            claim: claim.to_string(),
            verdict,
            evidence,
            skipped: judgments.skipped_count(),
        }
    }
}
