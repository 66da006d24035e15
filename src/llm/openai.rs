//! OpenAI-compatible chat completions client (Groq, OpenAI, local servers)

use super::{LanguageModel, LlmError};
use crate::config::LlmConfig;
use crate::metrics::METRICS;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Chat completions client that sends each prompt as a single user message
pub struct OpenAiCompatibleClient {
    client: Client,
    config: LlmConfig,
}

impl OpenAiCompatibleClient {
    /// Create a new client
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::Initialization(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl LanguageModel for OpenAiCompatibleClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        debug!("Sending completion request to {} ({} chars)", self.config.model, prompt.len());

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.config.temperature,
        };

        let mut req = self.client.post(&self.config.endpoint).json(&request);
        if let Some(ref api_key) = self.config.api_key {
            req = req.bearer_auth(api_key.expose_secret());
        }

        let response = req.send().await.map_err(|e| {
            METRICS.record_external_call("llm", false);
            LlmError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            METRICS.record_external_call("llm", false);
            let body = response.text().await.unwrap_or_default();
            error!("LLM API error {}: {}", status, body);
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            METRICS.record_external_call("llm", false);
            LlmError::MalformedResponse(e.to_string())
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                METRICS.record_external_call("llm", false);
                LlmError::MalformedResponse("No choices in response".to_string())
            })?;

        METRICS.record_external_call("llm", true);
        Ok(content)
    }
}

// OpenAI-compatible API types
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
