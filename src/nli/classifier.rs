//! Zero-shot classification over HTTP

use crate::config::NliConfig;
use crate::metrics::METRICS;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Candidate labels ranked by score, best first
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Classification {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

impl Classification {
    /// Highest-scoring label and its score
    pub fn top(&self) -> Option<(&str, f64)> {
        Some((self.labels.first()?.as_str(), *self.scores.first()?))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Upstream returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Zero-shot text classifier
#[async_trait]
pub trait ZeroShotClassifier: Send + Sync {
    async fn classify(
        &self,
        sequence: &str,
        candidate_labels: &[&str],
        hypothesis_template: &str,
    ) -> Result<Classification, ClassifierError>;
}

/// Hugging Face inference-style zero-shot endpoint
pub struct HttpZeroShotClassifier {
    http: Client,
    config: NliConfig,
}

impl HttpZeroShotClassifier {
    pub fn new(config: NliConfig) -> Result<Self, ClassifierError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClassifierError::Initialization(e.to_string()))?;

        Ok(Self { http, config })
    }

    async fn call(&self, request: &ZeroShotRequest<'_>) -> Result<Classification, ClassifierError> {
        let mut req = self.http.post(&self.config.endpoint).json(request);
        if let Some(ref token) = self.config.api_token {
            req = req.bearer_auth(token.expose_secret());
        }

        let response = req
            .send()
            .await
            .map_err(|e| ClassifierError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let classification: Classification = response
            .json()
            .await
            .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;

        if classification.labels.len() != classification.scores.len() {
            return Err(ClassifierError::InvalidResponse(
                "labels and scores differ in length".to_string(),
            ));
        }

        Ok(classification)
    }
}

#[derive(Debug, Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Debug, Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [&'a str],
    hypothesis_template: &'a str,
}

#[async_trait]
impl ZeroShotClassifier for HttpZeroShotClassifier {
    async fn classify(
        &self,
        sequence: &str,
        candidate_labels: &[&str],
        hypothesis_template: &str,
    ) -> Result<Classification, ClassifierError> {
        debug!("Zero-shot classification over {} labels", candidate_labels.len());

        let request = ZeroShotRequest {
            inputs: sequence,
            parameters: ZeroShotParameters {
                candidate_labels,
                hypothesis_template,
            },
        };

        let result = self.call(&request).await;
        METRICS.record_external_call("nli", result.is_ok());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_label() {
        let classification = Classification {
            labels: vec!["contradiction".to_string(), "neutral".to_string()],
            scores: vec![0.8, 0.2],
        };
        assert_eq!(classification.top(), Some(("contradiction", 0.8)));
    }

    #[test]
    fn test_top_of_empty_is_none() {
        let classification = Classification {
            labels: vec![],
            scores: vec![],
        };
        assert!(classification.top().is_none());
    }

    #[test]
    fn test_request_shape() {
        let labels = ["entailment", "contradiction", "neutral"];
        let request = ZeroShotRequest {
            inputs: "text",
            parameters: ZeroShotParameters {
                candidate_labels: &labels,
                hypothesis_template: "This evidence {} the claim.",
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["parameters"]["candidate_labels"][1], "contradiction");
    }
}
