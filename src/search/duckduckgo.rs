//! DuckDuckGo instant-answer search

use super::{SearchError, WebSearch};
use crate::config::SearchConfig;
use crate::metrics::METRICS;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Returned when the API answers but has nothing to say about the query
pub const NO_RESULTS: &str = "No good DuckDuckGo Search Result was found";

/// DuckDuckGo instant-answer API client
pub struct DuckDuckGoSearch {
    http: Client,
    endpoint: String,
}

impl DuckDuckGoSearch {
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SearchError::Initialization(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    async fn fetch(&self, query: &str) -> Result<String, SearchError> {
        let answer: InstantAnswer = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(answer.into_text())
    }
}

#[async_trait]
impl WebSearch for DuckDuckGoSearch {
    async fn run(&self, query: &str) -> Result<String, SearchError> {
        debug!("Web search: {}", query);
        let result = self.fetch(query).await;
        METRICS.record_external_call("web_search", result.is_ok());
        result
    }
}

#[derive(Debug, Deserialize, Default)]
struct InstantAnswer {
    #[serde(rename = "Heading", default)]
    heading: String,
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,
    #[serde(rename = "AbstractURL", default)]
    abstract_url: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Deserialize)]
struct RelatedTopic {
    #[serde(rename = "Text", default)]
    text: Option<String>,
    #[serde(rename = "FirstURL", default)]
    first_url: Option<String>,
}

impl InstantAnswer {
    fn into_text(self) -> String {
        let mut parts = Vec::new();

        if !self.abstract_text.is_empty() {
            let mut line = String::new();
            if !self.heading.is_empty() {
                line.push_str(&self.heading);
                line.push_str(": ");
            }
            line.push_str(&self.abstract_text);
            if !self.abstract_url.is_empty() {
                line.push_str(&format!(" ({})", self.abstract_url));
            }
            parts.push(line);
        }

        // grouped topics carry no Text and are skipped
        for topic in self.related_topics {
            if let Some(text) = topic.text.filter(|t| !t.is_empty()) {
                match topic.first_url {
                    Some(url) if !url.is_empty() => parts.push(format!("{} ({})", text, url)),
                    _ => parts.push(text),
                }
            }
        }

        if parts.is_empty() {
            NO_RESULTS.to_string()
        } else {
            parts.join(" ")
        }
    }
}
