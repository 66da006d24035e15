//! LLM completion boundary
//!
//! The planner and adjudicator only ever see `complete(prompt) -> text`.
//! Nothing downstream assumes more structure than line-splittable text.

pub mod openai;

use async_trait::async_trait;

pub use openai::OpenAiCompatibleClient;

/// Text completion service
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete a single prompt and return the raw response text
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// LLM errors
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Upstream returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout(e.to_string())
        } else {
            LlmError::Transport(e.to_string())
        }
    }
}
